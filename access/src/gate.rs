//! Access gate: maps a session snapshot and a page policy to what the page
//! renders.
//!
//! DESIGN
//! ======
//! The gate is a pure function re-evaluated on every session change, with a
//! fixed tie-break order:
//!
//! `Checking > Error > Unauthenticated > Unauthorized > Authorized`
//!
//! Right after mount the resolver has not run yet, so the gate stays in
//! Checking for a configurable number of settle cycles ([`MountDebounce`])
//! instead of flashing the unauthenticated view.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::location::login_redirect;
use crate::policy::{AccessPolicy, Fallback};
use crate::role::Role;
use crate::session::Session;

/// What to do with an unauthenticated visitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnauthenticatedAction {
    /// Render the page content as a public view.
    RenderPublic,
    /// Navigate to `target` and render nothing.
    Redirect { target: String },
}

/// The gate's verdict for one session snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateState {
    /// Session still loading or the mount has not settled.
    Checking,
    /// The session carries a remote-service failure.
    Error { message: String },
    /// Nobody is signed in.
    Unauthenticated(UnauthenticatedAction),
    /// Signed in with a role outside the policy.
    Unauthorized { current: Option<Role>, required: Vec<Role> },
    /// Signed in with an allowed role.
    Authorized,
}

/// Gate configured for one protected page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessGate {
    policy: AccessPolicy,
    login_route: String,
}

impl AccessGate {
    #[must_use]
    pub fn new(policy: AccessPolicy, login_route: impl Into<String>) -> Self {
        Self { policy, login_route: login_route.into() }
    }

    #[must_use]
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Evaluate `session`. `settled` is false during the post-mount settle
    /// window; `return_to` is the path sent to the login route on redirect.
    #[must_use]
    pub fn evaluate(&self, session: &Session, settled: bool, return_to: &str) -> GateState {
        if session.loading || !settled {
            return GateState::Checking;
        }
        if let Some(message) = &session.last_error {
            return GateState::Error { message: message.clone() };
        }
        let Some(user) = &session.user else {
            return GateState::Unauthenticated(match self.policy.fallback() {
                Fallback::RenderPublic => UnauthenticatedAction::RenderPublic,
                Fallback::RedirectToLogin => UnauthenticatedAction::Redirect {
                    target: login_redirect(&self.login_route, return_to),
                },
            });
        };
        if !self.policy.permits(user.role) {
            return GateState::Unauthorized {
                current: Some(user.role),
                required: self.policy.allowed_roles().to_vec(),
            };
        }
        GateState::Authorized
    }
}

/// Counts down the evaluations after mount during which the gate reports
/// Checking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountDebounce {
    remaining: u32,
}

impl MountDebounce {
    #[must_use]
    pub fn new(cycles: u32) -> Self {
        Self { remaining: cycles }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one cycle. Returns whether the debounce is now settled.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_settled()
    }
}

/// Text for the access-denied panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeniedNotice {
    pub current: String,
    pub required: String,
}

impl DeniedNotice {
    #[must_use]
    pub fn new(current: Option<Role>, required: &[Role]) -> Self {
        let current = current.map_or_else(|| "none".to_owned(), |role| role.to_string());
        let required = required.iter().map(|role| role.as_str()).collect::<Vec<_>>().join(", ");
        Self { current, required }
    }

    /// `"Current role: employee"`.
    #[must_use]
    pub fn current_line(&self) -> String {
        format!("Current role: {}", self.current)
    }

    /// `"Required roles: manager, admin"`.
    #[must_use]
    pub fn required_line(&self) -> String {
        format!("Required roles: {}", self.required)
    }
}
