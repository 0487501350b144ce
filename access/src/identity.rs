//! Remote identity service contract and change notifications.
//!
//! ARCHITECTURE
//! ============
//! In production the portal does not own identity: it asks an external
//! service for the current session, exchanges credentials, signs out, and
//! looks up the role for an identity id. Services broadcast
//! [`SessionChange`]s through a [`SessionChannel`]; each subscriber holds a
//! [`Subscription`] that unsubscribes when dropped.
//!
//! Futures are `?Send` because the browser transport is single-threaded.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use async_trait::async_trait;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

use crate::role::{Role, RoleParseError};
use crate::session::Identity;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The credential/secret pair was rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Transport or service failure; carries the service's message.
    #[error("{0}")]
    Service(String),
    /// The service returned a role tag the portal does not know.
    #[error(transparent)]
    UnknownRole(#[from] RoleParseError),
}

/// A change in the remote session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn(Identity),
    SignedOut,
}

/// The external identity backend.
#[async_trait(?Send)]
pub trait IdentityService: Send + Sync {
    /// The identity bound to the current session, if any.
    async fn current_session(&self) -> Result<Option<Identity>, IdentityError>;

    /// Exchange a credential (usually an email) and secret for a session.
    async fn sign_in_with_credential(&self, credential: &str, secret: &str) -> Result<Identity, IdentityError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Look up the role assigned to `identity_id`.
    async fn role_of(&self, identity_id: &str) -> Result<Role, IdentityError>;

    /// Subscribe to session changes.
    fn on_session_change(&self) -> SessionWatch;
}

// =============================================================================
// CHANGE CHANNEL
// =============================================================================

/// Registry of change listeners.
#[derive(Debug, Default)]
pub struct SessionChannel {
    listeners: Mutex<Vec<(u64, UnboundedSender<SessionChange>)>>,
    next_id: AtomicU64,
}

impl SessionChannel {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a listener.
    #[must_use]
    pub fn subscribe(self: &Arc<Self>) -> SessionWatch {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = unbounded();
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push((id, tx));
        SessionWatch { subscription: Subscription { id, channel: Arc::downgrade(self) }, changes: rx }
    }

    /// Deliver `change` to every live listener, pruning closed ones.
    pub fn publish(&self, change: &SessionChange) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|(_, tx)| tx.unbounded_send(change.clone()).is_ok());
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Handle that keeps a listener registered; dropping it unsubscribes and ends
/// the paired change stream.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    channel: Weak<SessionChannel>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.upgrade() {
            channel.unsubscribe(self.id);
        }
    }
}

/// A subscription plus the stream of changes it receives.
#[derive(Debug)]
pub struct SessionWatch {
    pub subscription: Subscription,
    pub changes: UnboundedReceiver<SessionChange>,
}

// =============================================================================
// IN-MEMORY SERVICE
// =============================================================================

#[derive(Debug, Clone)]
struct Registration {
    identity: Identity,
    secret: String,
    role: Role,
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: HashMap<String, Registration>,
    current: Option<String>,
}

/// Complete in-process [`IdentityService`].
///
/// Credentials are matched by email (case-insensitive). Used for demos and as
/// the reference behaviour in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityService {
    state: Arc<Mutex<InMemoryState>>,
    channel: Arc<SessionChannel>,
}

impl InMemoryIdentityService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user.
    #[must_use]
    pub fn with_user(self, identity: Identity, secret: &str, role: Role) -> Self {
        {
            let mut state = self.lock();
            state.users.insert(
                identity.email.trim().to_ascii_lowercase(),
                Registration { identity, secret: secret.to_owned(), role },
            );
        }
        self
    }

    /// Mark `email` as already signed in (e.g. a session cookie from an
    /// earlier visit). Unknown emails are ignored.
    pub fn restore_session(&self, email: &str) {
        let key = email.trim().to_ascii_lowercase();
        let mut state = self.lock();
        if state.users.contains_key(&key) {
            state.current = Some(key);
        }
    }

    /// Change a user's role, as an administrator would.
    pub fn assign_role(&self, identity_id: &str, role: Role) {
        let mut state = self.lock();
        if let Some(reg) = state.users.values_mut().find(|r| r.identity.id == identity_id) {
            reg.role = role;
        }
    }

    /// The channel used for change notifications.
    #[must_use]
    pub fn channel(&self) -> &Arc<SessionChannel> {
        &self.channel
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait(?Send)]
impl IdentityService for InMemoryIdentityService {
    async fn current_session(&self) -> Result<Option<Identity>, IdentityError> {
        let state = self.lock();
        Ok(state
            .current
            .as_ref()
            .and_then(|key| state.users.get(key))
            .map(|reg| reg.identity.clone()))
    }

    async fn sign_in_with_credential(&self, credential: &str, secret: &str) -> Result<Identity, IdentityError> {
        let key = credential.trim().to_ascii_lowercase();
        let identity = {
            let mut state = self.lock();
            let identity = match state.users.get(&key) {
                Some(reg) if reg.secret == secret => reg.identity.clone(),
                _ => return Err(IdentityError::InvalidCredentials),
            };
            state.current = Some(key);
            identity
        };
        self.channel.publish(&SessionChange::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.lock().current = None;
        self.channel.publish(&SessionChange::SignedOut);
        Ok(())
    }

    async fn role_of(&self, identity_id: &str) -> Result<Role, IdentityError> {
        self.lock()
            .users
            .values()
            .find(|reg| reg.identity.id == identity_id)
            .map(|reg| reg.role)
            .ok_or_else(|| IdentityError::Service(format!("no role assigned to {identity_id}")))
    }

    fn on_session_change(&self) -> SessionWatch {
        self.channel.subscribe()
    }
}
