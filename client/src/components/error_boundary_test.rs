use std::sync::Arc;

use access::{
    AccountDirectory, Environment, InMemoryIdentityService, NoopStore, PortalConfig, Session, SessionResolver,
    SharedSession,
};

use super::*;

fn provide_with_home(home: &str) {
    let mut config = PortalConfig::for_environment(Environment::Development);
    config.routes.home = home.to_owned();
    let resolver = SessionResolver::new(
        config,
        AccountDirectory::builtin(),
        Arc::new(NoopStore),
        Arc::new(InMemoryIdentityService::new()),
        Arc::new(SharedSession::new()),
    );
    provide_context(AuthContext::new(RwSignal::new(Session::default()), resolver));
}

#[test]
fn home_route_defaults_without_auth_context() {
    let owner = Owner::new();
    owner.set();
    assert_eq!(home_route(), "/");
}

#[test]
fn home_route_follows_configured_routes() {
    let owner = Owner::new();
    owner.set();
    provide_with_home("/portal");
    assert_eq!(home_route(), "/portal");
}
