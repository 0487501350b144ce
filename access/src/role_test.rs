use super::*;

#[test]
fn parses_every_known_tag() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }
}

#[test]
fn parse_is_case_insensitive_and_trims() {
    assert_eq!("  HR ".parse::<Role>(), Ok(Role::Hr));
    assert_eq!("Manager".parse::<Role>(), Ok(Role::Manager));
}

#[test]
fn parse_rejects_unknown_tag() {
    assert_eq!("superuser".parse::<Role>(), Err(RoleParseError("superuser".to_owned())));
    assert_eq!("".parse::<Role>(), Err(RoleParseError(String::new())));
}

#[test]
fn display_matches_wire_tag() {
    assert_eq!(Role::Employee.to_string(), "employee");
}

#[test]
fn serde_uses_lowercase_tags() {
    assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"hr\"");
    let role: Role = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(role, Role::Admin);
}
