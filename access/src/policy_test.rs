use super::*;

#[test]
fn allow_builder_keeps_order_and_dedups() {
    let policy = AccessPolicy::allow(Role::Manager).or(Role::Admin).or(Role::Manager);
    assert_eq!(policy.allowed_roles(), &[Role::Manager, Role::Admin]);
    assert_eq!(policy.fallback(), Fallback::RedirectToLogin);
}

#[test]
fn any_of_rejects_empty_list() {
    assert_eq!(AccessPolicy::any_of([], Fallback::RenderPublic), Err(PolicyError::NoRoles));
}

#[test]
fn any_of_dedups_roles() {
    let policy = AccessPolicy::any_of([Role::Hr, Role::Hr, Role::Admin], Fallback::RenderPublic).unwrap();
    assert_eq!(policy.allowed_roles(), &[Role::Hr, Role::Admin]);
    assert_eq!(policy.fallback(), Fallback::RenderPublic);
}

#[test]
fn permits_checks_membership() {
    let policy = AccessPolicy::allow(Role::Hr);
    assert!(policy.permits(Role::Hr));
    assert!(!policy.permits(Role::Employee));
}

#[test]
fn any_role_permits_everyone() {
    let policy = AccessPolicy::any_role();
    assert!(Role::ALL.into_iter().all(|role| policy.permits(role)));
}

#[test]
fn fallback_serializes_kebab_case() {
    assert_eq!(serde_json::to_string(&Fallback::RenderPublic).unwrap(), "\"render-public\"");
    assert_eq!(serde_json::to_string(&Fallback::RedirectToLogin).unwrap(), "\"redirect-to-login\"");
}
