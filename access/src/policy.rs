//! Per-page access declarations.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// What an unauthenticated visitor sees on a protected page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// Navigate to the login route with the current path as return target.
    #[default]
    RedirectToLogin,
    /// Render the page content anyway (public view).
    RenderPublic,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// A policy must admit at least one role.
    #[error("access policy must allow at least one role")]
    NoRoles,
}

/// The roles allowed to view a page plus its unauthenticated fallback.
///
/// `allowed_roles` is never empty and keeps caller order, which is also the
/// order shown on the access-denied panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccessPolicy {
    allowed_roles: Vec<Role>,
    fallback: Fallback,
}

impl AccessPolicy {
    /// Policy admitting `role`, redirecting unauthenticated visitors.
    #[must_use]
    pub fn allow(role: Role) -> Self {
        Self { allowed_roles: vec![role], fallback: Fallback::RedirectToLogin }
    }

    /// Policy admitting every known role.
    #[must_use]
    pub fn any_role() -> Self {
        Self { allowed_roles: Role::ALL.to_vec(), fallback: Fallback::RedirectToLogin }
    }

    /// Build from an arbitrary role list.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NoRoles`] if `roles` is empty.
    pub fn any_of(roles: impl IntoIterator<Item = Role>, fallback: Fallback) -> Result<Self, PolicyError> {
        let mut allowed_roles = Vec::new();
        for role in roles {
            if !allowed_roles.contains(&role) {
                allowed_roles.push(role);
            }
        }
        if allowed_roles.is_empty() {
            return Err(PolicyError::NoRoles);
        }
        Ok(Self { allowed_roles, fallback })
    }

    /// Also admit `role`.
    #[must_use]
    pub fn or(mut self, role: Role) -> Self {
        if !self.allowed_roles.contains(&role) {
            self.allowed_roles.push(role);
        }
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed_roles
    }

    #[must_use]
    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    #[must_use]
    pub fn permits(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}
