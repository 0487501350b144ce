//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` calls [`provide_auth`] once. It owns the single [`SessionResolver`]
//! for the page load and mirrors every session snapshot into a reactive
//! signal so route guards, the nav bar and pages re-render when the user,
//! role or loading flag changes.
//!
//! LIFECYCLE
//! =========
//! Each page that depends on the session calls [`resolve_on_mount`], so the
//! resolver runs once per page mount with that page's URL. In production the
//! remote session-change stream is followed for the life of the app. When
//! the owning scope is cleaned up the resolver is torn down and late results
//! are dropped instead of written into a disposed signal.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use access::{
    AccountDirectory, AuthError, PortalConfig, Session, SessionCell, SessionResolver, SessionUser,
};
use leptos::prelude::*;

use crate::net::identity::HttpIdentityService;
use crate::util::storage::BrowserStore;

/// Session cell backed by a Leptos signal.
pub struct SignalSession(pub RwSignal<Session>);

impl SessionCell for SignalSession {
    fn snapshot(&self) -> Session {
        self.0.try_get_untracked().unwrap_or_default()
    }

    fn replace(&self, session: Session) {
        if self.0.try_set(session).is_some() {
            log::debug!("session signal disposed; update dropped");
        }
    }
}

/// Handle shared through context.
#[derive(Clone)]
pub struct AuthContext {
    pub session: RwSignal<Session>,
    resolver: SessionResolver,
}

impl AuthContext {
    /// Wrap an existing resolver whose cell writes into `session`.
    #[must_use]
    pub fn new(session: RwSignal<Session>, resolver: SessionResolver) -> Self {
        Self { session, resolver }
    }

    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        self.resolver.config()
    }

    #[must_use]
    pub fn accounts(&self) -> &AccountDirectory {
        self.resolver.accounts()
    }

    #[must_use]
    pub fn resolver(&self) -> &SessionResolver {
        &self.resolver
    }

    /// Reactive read of the signed-in user.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.session.with(|s| s.user.clone())
    }

    /// # Errors
    ///
    /// See [`SessionResolver::sign_in`].
    pub async fn sign_in(&self, email: &str, secret: &str) -> Result<SessionUser, AuthError> {
        self.resolver.sign_in(email, secret).await
    }

    /// # Errors
    ///
    /// See [`SessionResolver::sign_out`].
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.resolver.sign_out().await
    }
}

/// Build the resolver for this page load and put it in context.
pub fn provide_auth(config: PortalConfig) -> AuthContext {
    let session = RwSignal::new(Session::default());
    let identity = HttpIdentityService::new(&config.identity_base_url);
    let resolver = SessionResolver::new(
        config,
        AccountDirectory::builtin(),
        Arc::new(BrowserStore),
        Arc::new(identity),
        Arc::new(SignalSession(session)),
    );
    let auth = AuthContext::new(session, resolver);
    provide_context(auth.clone());

    #[cfg(feature = "hydrate")]
    {
        let watcher = auth.resolver.clone();
        Effect::new(move || {
            if let Some(driver) = watcher.watch_remote() {
                leptos::task::spawn_local(driver);
            }
        });
        let resolver = auth.resolver.clone();
        on_cleanup(move || resolver.teardown());
    }

    auth
}

/// Auth handle from context. Panics outside `App`.
#[must_use]
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Resolve the session for the page being mounted, using the URL it was
/// mounted at. Runs once per mount and only after hydration, so client-side
/// navigation between pages re-probes the store and bypass parameters.
pub fn resolve_on_mount(auth: &AuthContext) {
    #[cfg(feature = "hydrate")]
    {
        let location = leptos_router::hooks::use_location();
        let resolver = auth.resolver.clone();
        Effect::new(move || {
            let target = access::Location::from_parts(
                &location.pathname.get_untracked(),
                &location.search.get_untracked(),
            );
            let resolver = resolver.clone();
            leptos::task::spawn_local(async move {
                resolver.resolve(&target).await;
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = auth;
    }
}
