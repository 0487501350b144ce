use super::*;

fn user(role: Role) -> SessionUser {
    SessionUser {
        identity: Identity {
            id: "u1".to_owned(),
            email: "a@b.com".to_owned(),
            name: "Alice".to_owned(),
            avatar_url: None,
            department: None,
            position: None,
        },
        role,
    }
}

// =============================================================
// Session defaults and accessors
// =============================================================

#[test]
fn default_session_is_loading_and_empty() {
    let session = Session::default();
    assert!(session.is_loading());
    assert!(session.identity().is_none());
    assert!(session.role().is_none());
    assert!(session.last_error().is_none());
}

#[test]
fn settled_session_exposes_identity_and_role() {
    let session = Session::settled(Some(user(Role::Hr)));
    assert!(!session.is_loading());
    assert!(session.is_authenticated());
    assert_eq!(session.identity().map(|i| i.email.as_str()), Some("a@b.com"));
    assert_eq!(session.role(), Some(Role::Hr));
}

#[test]
fn loading_session_is_never_authenticated() {
    let session = Session { user: Some(user(Role::Admin)), loading: true, last_error: None };
    assert!(!session.is_authenticated());
}

#[test]
fn failed_session_carries_message() {
    let session = Session::failed("network down");
    assert!(!session.is_loading());
    assert_eq!(session.last_error(), Some("network down"));
    assert!(session.user.is_none());
}

// =============================================================
// SharedSession
// =============================================================

#[test]
fn shared_session_clones_observe_same_value() {
    let cell = SharedSession::new();
    let other = cell.clone();
    cell.replace(Session::settled(Some(user(Role::Employee))));
    assert_eq!(other.snapshot().role(), Some(Role::Employee));
}
