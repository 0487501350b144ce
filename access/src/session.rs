//! Session data model for a single page load.
//!
//! SYSTEM CONTEXT
//! ==============
//! The resolver writes [`Session`] snapshots into a [`SessionCell`]; the gate
//! and user-aware components read them. Identity and role are coupled in
//! [`SessionUser`] so no observer ever sees an identity without its role.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The authenticated person, as reported by the mock table or identity service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier (`mock:<email>` for mock accounts).
    pub id: String,
    /// Sign-in email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL, if available.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Department, if known.
    #[serde(default)]
    pub department: Option<String>,
    /// Job title, if known.
    #[serde(default)]
    pub position: Option<String>,
}

/// An identity together with the role it resolved to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub identity: Identity,
    pub role: Role,
}

/// Authentication state for the lifetime of a page load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Resolved user, or `None` when unauthenticated.
    pub user: Option<SessionUser>,
    /// `true` until the first resolution finishes. While set, `user` is not
    /// authoritative.
    pub loading: bool,
    /// Message of the last remote-service failure, if any.
    pub last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self { user: None, loading: true, last_error: None }
    }
}

impl Session {
    /// A settled session for `user`.
    #[must_use]
    pub fn settled(user: Option<SessionUser>) -> Self {
        Self { user, loading: false, last_error: None }
    }

    /// A settled session carrying a remote-service failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self { user: None, loading: false, last_error: Some(message.into()) }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.user.as_ref().map(|u| &u.identity)
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }
}

/// Destination for session snapshots published by the resolver.
///
/// Implementations must tolerate writes after their owner is gone (for
/// example a disposed signal) by dropping them.
pub trait SessionCell: Send + Sync {
    /// Current value.
    fn snapshot(&self) -> Session;
    /// Replace the current value.
    fn replace(&self, session: Session);
}

/// Mutex-backed [`SessionCell`] used on the server and in tests.
#[derive(Clone, Debug, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionCell for SharedSession {
    fn snapshot(&self) -> Session {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn replace(&self, session: Session) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }
}
