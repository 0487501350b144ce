//! Session resolver: decides who the caller is and keeps the session current.
//!
//! SYSTEM CONTEXT
//! ==============
//! A protected page mounts, the client builds one resolver per page load and
//! calls [`SessionResolver::resolve`]. The resolver probes, in strict order,
//! auth-entry routes, bypass query parameters, the locally persisted mock
//! account, and finally the remote identity service, stopping at the first
//! probe that answers. Every snapshot is written to the injected
//! [`SessionCell`].
//!
//! ERROR HANDLING
//! ==============
//! Nothing here panics or returns a transport error to the page:
//! - storage failures are logged and treated as an empty store;
//! - remote failures land in `Session::last_error`;
//! - `sign_in` / `sign_out` additionally return [`AuthError`] to the caller;
//! - rejected credentials are returned but never written to the session.

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::StreamExt;

use crate::accounts::{AccountDirectory, normalize_email};
use crate::config::PortalConfig;
use crate::identity::{IdentityError, IdentityService, SessionChange, SessionWatch, Subscription};
use crate::location::{BypassParams, Location};
use crate::session::{Identity, Session, SessionCell, SessionUser};
use crate::store::KeyValueStore;

/// Failure returned by [`SessionResolver::sign_in`] and [`SessionResolver::sign_out`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Remote-service failure, carrying the service's message.
    #[error("{0}")]
    Service(String),
}

impl From<IdentityError> for AuthError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            other => Self::Service(other.to_string()),
        }
    }
}

enum Resolution {
    Resolved(Option<SessionUser>),
    Failed(String),
}

struct Inner {
    config: PortalConfig,
    accounts: AccountDirectory,
    store: Arc<dyn KeyValueStore>,
    identity: Arc<dyn IdentityService>,
    cell: Arc<dyn SessionCell>,
    mounted: AtomicBool,
    /// Bumped whenever sign-in, sign-out or a remote change sets the user.
    /// A resolve that started under an older generation is stale.
    generation: AtomicU64,
    subscription: Mutex<Option<Subscription>>,
}

/// Produces the [`Session`] and offers sign-in/sign-out. Cheap to clone.
#[derive(Clone)]
pub struct SessionResolver {
    inner: Arc<Inner>,
}

impl SessionResolver {
    #[must_use]
    pub fn new(
        config: PortalConfig,
        accounts: AccountDirectory,
        store: Arc<dyn KeyValueStore>,
        identity: Arc<dyn IdentityService>,
        cell: Arc<dyn SessionCell>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                accounts,
                store,
                identity,
                cell,
                mounted: AtomicBool::new(true),
                generation: AtomicU64::new(0),
                subscription: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn accounts(&self) -> &AccountDirectory {
        &self.inner.accounts
    }

    /// Latest snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.inner.cell.snapshot()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::Acquire)
    }

    /// Determine the current identity and role. Always finishes with
    /// `loading == false`.
    pub async fn resolve(&self, location: &Location) -> Session {
        self.publish(|session| session.loading = true);
        let started = self.inner.generation.load(Ordering::Acquire);
        let resolution = self.probe(location).await;
        if self.inner.generation.load(Ordering::Acquire) != started {
            log::debug!("session changed while resolving; dropping stale result");
            self.publish(|session| session.loading = false);
            return self.session();
        }
        match resolution {
            Resolution::Resolved(user) => self.publish(|session| {
                session.user = user;
                session.last_error = None;
                session.loading = false;
            }),
            Resolution::Failed(message) => {
                log::warn!("session resolution failed: {message}");
                self.publish(|session| {
                    session.last_error = Some(message);
                    session.loading = false;
                });
            }
        }
        self.session()
    }

    /// Authenticate with a credential (email) and secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair is rejected
    /// (the session is left untouched) or [`AuthError::Service`] when the
    /// identity service fails (also recorded in `last_error`).
    pub async fn sign_in(&self, credential: &str, secret: &str) -> Result<SessionUser, AuthError> {
        if self.inner.config.environment.allows_mock_accounts() {
            let Some(account) = self.inner.accounts.authenticate(credential, secret) else {
                log::info!("mock sign-in rejected");
                return Err(AuthError::InvalidCredentials);
            };
            let user = account.to_user();
            self.store_set(&self.inner.config.storage_key, &account.email);
            self.store_remove(&self.inner.config.bypass_profile_key);
            self.publish_user(Some(user.clone()));
            log::info!("mock sign-in as {} ({})", user.identity.email, user.role);
            return Ok(user);
        }

        let result = match self.inner.identity.sign_in_with_credential(credential, secret).await {
            Ok(identity) => self.with_role(identity).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(user) => {
                self.publish_user(Some(user.clone()));
                Ok(user)
            }
            Err(IdentityError::InvalidCredentials) => Err(AuthError::InvalidCredentials),
            Err(e) => Err(self.record_remote_failure(e)),
        }
    }

    /// End the session. Repeating a sign-out is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Service`] if the identity service fails; the
    /// current user is kept and the message recorded in `last_error`.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        if self.inner.config.environment.allows_mock_accounts() {
            self.store_remove(&self.inner.config.storage_key);
            self.store_remove(&self.inner.config.bypass_profile_key);
            self.publish_user(None);
            return Ok(());
        }

        match self.inner.identity.sign_out().await {
            Ok(()) => {
                self.publish_user(None);
                Ok(())
            }
            Err(e) => Err(self.record_remote_failure(e)),
        }
    }

    /// Subscribe to remote session changes (production only).
    ///
    /// Returns the driver future, which applies changes until
    /// [`teardown`](Self::teardown) drops the subscription. Calling this again
    /// replaces the previous subscription.
    #[must_use]
    pub fn watch_remote(&self) -> Option<impl Future<Output = ()> + 'static> {
        if !self.inner.config.environment.is_production() || !self.is_mounted() {
            return None;
        }
        let SessionWatch { subscription, mut changes } = self.inner.identity.on_session_change();
        *self.inner.subscription.lock().unwrap_or_else(PoisonError::into_inner) = Some(subscription);

        let resolver = self.clone();
        Some(async move {
            while let Some(change) = changes.next().await {
                resolver.apply_change(change).await;
            }
            log::debug!("session change stream closed");
        })
    }

    /// Mark the hosting page as gone: later updates are discarded and the
    /// remote subscription is dropped.
    pub fn teardown(&self) {
        self.inner.mounted.store(false, Ordering::Release);
        let subscription = self.inner.subscription.lock().unwrap_or_else(PoisonError::into_inner).take();
        drop(subscription);
    }

    // =========================================================================
    // PROBES
    // =========================================================================

    async fn probe(&self, location: &Location) -> Resolution {
        let config = &self.inner.config;
        if !config.environment.allows_mock_accounts() {
            return self.fetch_remote_user().await;
        }
        if location.is_auth_entry(&config.routes) {
            log::debug!("auth entry route {}; skipping auto sign-in", location.path());
            return Resolution::Resolved(None);
        }
        if let Some(user) = self.bypass_user(location) {
            return Resolution::Resolved(Some(user));
        }
        Resolution::Resolved(self.restore_mock_user())
    }

    fn bypass_user(&self, location: &Location) -> Option<SessionUser> {
        let params = BypassParams::from_location(location)?;
        let user = match params.into_user() {
            Ok(user) => user,
            Err(e) => {
                log::warn!("ignoring bypass parameters: {e}");
                return None;
            }
        };
        let config = &self.inner.config;
        self.store_set(&config.storage_key, &user.identity.email);
        match serde_json::to_string(&user) {
            Ok(profile) => self.store_set(&config.bypass_profile_key, &profile),
            Err(e) => log::warn!("could not encode bypass profile: {e}"),
        }
        log::info!("bypass session as {} ({})", user.identity.email, user.role);
        Some(user)
    }

    fn restore_mock_user(&self) -> Option<SessionUser> {
        let config = &self.inner.config;
        let email = self.store_get(&config.storage_key)?;
        if let Some(account) = self.inner.accounts.find_by_email(&email) {
            return Some(account.to_user());
        }
        let profile = self
            .store_get(&config.bypass_profile_key)
            .and_then(|raw| serde_json::from_str::<SessionUser>(&raw).ok())
            .filter(|user| normalize_email(&user.identity.email) == normalize_email(&email));
        if profile.is_none() {
            log::debug!("persisted mock email {email} matches no account");
        }
        profile
    }

    async fn fetch_remote_user(&self) -> Resolution {
        let identity = match self.inner.identity.current_session().await {
            Ok(Some(identity)) => identity,
            Ok(None) => return Resolution::Resolved(None),
            Err(e) => return Resolution::Failed(e.to_string()),
        };
        match self.with_role(identity).await {
            Ok(user) => Resolution::Resolved(Some(user)),
            Err(e) => Resolution::Failed(e.to_string()),
        }
    }

    async fn with_role(&self, identity: Identity) -> Result<SessionUser, IdentityError> {
        let role = self.inner.identity.role_of(&identity.id).await?;
        Ok(SessionUser { identity, role })
    }

    async fn apply_change(&self, change: SessionChange) {
        match change {
            SessionChange::SignedOut => self.publish_user(None),
            SessionChange::SignedIn(identity) => {
                if self.session().identity().is_some_and(|current| current.id == identity.id) {
                    return;
                }
                match self.with_role(identity).await {
                    Ok(user) => self.publish_user(Some(user)),
                    Err(e) => {
                        let _ = self.record_remote_failure(e);
                    }
                }
            }
        }
    }

    // =========================================================================
    // STATE + STORAGE HELPERS
    // =========================================================================

    fn publish(&self, update: impl FnOnce(&mut Session)) {
        if !self.is_mounted() {
            log::debug!("resolver torn down; discarding session update");
            return;
        }
        let mut session = self.inner.cell.snapshot();
        update(&mut session);
        self.inner.cell.replace(session);
    }

    fn publish_user(&self, user: Option<SessionUser>) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.publish(|session| {
            session.user = user;
            session.last_error = None;
            session.loading = false;
        });
    }

    fn record_remote_failure(&self, err: IdentityError) -> AuthError {
        let err = AuthError::from(err);
        log::warn!("identity service call failed: {err}");
        let message = err.to_string();
        self.publish(|session| {
            session.last_error = Some(message);
            session.loading = false;
        });
        err
    }

    fn store_get(&self, key: &str) -> Option<String> {
        self.inner.store.get(key).unwrap_or_else(|e| {
            log::warn!("reading {key} from local storage failed: {e}");
            None
        })
    }

    fn store_set(&self, key: &str, value: &str) {
        if let Err(e) = self.inner.store.set(key, value) {
            log::warn!("writing {key} to local storage failed: {e}");
        }
    }

    fn store_remove(&self, key: &str) {
        if let Err(e) = self.inner.store.remove(key) {
            log::warn!("removing {key} from local storage failed: {e}");
        }
    }
}
