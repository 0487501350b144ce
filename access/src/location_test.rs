use super::*;

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_splits_path_and_decodes_query() {
    let location = Location::parse("/payroll?mockEmail=x%40y.com&mockName=Jane+Doe#top");
    assert_eq!(location.path(), "/payroll");
    assert_eq!(location.query("mockEmail"), Some("x@y.com"));
    assert_eq!(location.query("mockName"), Some("Jane Doe"));
}

#[test]
fn parse_keeps_first_duplicate_key() {
    let location = Location::parse("/?a=1&a=2");
    assert_eq!(location.query("a"), Some("1"));
}

#[test]
fn parse_empty_path_defaults_to_root() {
    assert_eq!(Location::parse("?x=1").path(), "/");
}

#[test]
fn from_parts_accepts_search_with_or_without_question_mark() {
    assert_eq!(Location::from_parts("/a", "?k=v").query("k"), Some("v"));
    assert_eq!(Location::from_parts("/a", "k=v").query("k"), Some("v"));
}

#[test]
fn path_and_query_reencodes() {
    let location = Location::parse("/reports?q=a b");
    assert_eq!(location.path_and_query(), "/reports?q=a%20b");
    assert_eq!(Location::parse("/reports").path_and_query(), "/reports");
}

// =============================================================
// Auth entry routes
// =============================================================

#[test]
fn login_and_logout_are_auth_entries() {
    let routes = AuthRoutes::default();
    assert!(Location::parse("/login").is_auth_entry(&routes));
    assert!(Location::parse("/logout/").is_auth_entry(&routes));
    assert!(Location::parse("/app/login?redirect=%2F").is_auth_entry(&routes));
}

#[test]
fn other_routes_are_not_auth_entries() {
    let routes = AuthRoutes::default();
    assert!(!Location::parse("/").is_auth_entry(&routes));
    assert!(!Location::parse("/relogin").is_auth_entry(&routes));
    assert!(!Location::parse("/login/help").is_auth_entry(&routes));
}

// =============================================================
// Redirect targets
// =============================================================

#[test]
fn login_redirect_encodes_return_target() {
    assert_eq!(login_redirect("/login", "/payroll?tab=2"), "/login?redirect=%2Fpayroll%3Ftab%3D2");
}

#[test]
fn safe_return_target_accepts_local_paths_only() {
    assert_eq!(safe_return_target(Some("/payroll"), "/"), "/payroll");
    assert_eq!(safe_return_target(Some("//evil.com"), "/"), "/");
    assert_eq!(safe_return_target(Some("https://evil.com"), "/"), "/");
    assert_eq!(safe_return_target(Some("/\\evil.com"), "/"), "/");
    assert_eq!(safe_return_target(None, "/home"), "/home");
}

// =============================================================
// Bypass parameters
// =============================================================

#[test]
fn bypass_requires_flag_email_and_role() {
    let on = Location::parse("/?mockEmail=x@y.com&mockRole=hr&mockBypass=true");
    assert!(BypassParams::from_location(&on).is_some());

    let no_flag = Location::parse("/?mockEmail=x@y.com&mockRole=hr");
    assert!(BypassParams::from_location(&no_flag).is_none());

    let false_flag = Location::parse("/?mockEmail=x@y.com&mockRole=hr&mockBypass=false");
    assert!(BypassParams::from_location(&false_flag).is_none());

    let no_role = Location::parse("/?mockEmail=x@y.com&mockBypass=true");
    assert!(BypassParams::from_location(&no_role).is_none());
}

#[test]
fn bypass_builds_synthetic_user() {
    let location = Location::parse("/?mockEmail=x@y.com&mockRole=hr&mockBypass=true");
    let user = BypassParams::from_location(&location).unwrap().into_user().unwrap();
    assert_eq!(user.identity.email, "x@y.com");
    assert_eq!(user.identity.name, "x");
    assert_eq!(user.identity.id, "bypass:x@y.com");
    assert_eq!(user.role, Role::Hr);
}

#[test]
fn bypass_uses_mock_name_when_given() {
    let location = Location::parse("/?mockEmail=x@y.com&mockRole=admin&mockName=Xavier&mockBypass=true");
    let user = BypassParams::from_location(&location).unwrap().into_user().unwrap();
    assert_eq!(user.identity.name, "Xavier");
}

#[test]
fn bypass_with_unknown_role_fails() {
    let location = Location::parse("/?mockEmail=x@y.com&mockRole=root&mockBypass=true");
    let err = BypassParams::from_location(&location).unwrap().into_user().unwrap_err();
    assert_eq!(err, RoleParseError("root".to_owned()));
}
