//! Mock account directory for non-production sign-in.
//!
//! The table is injected into the resolver rather than read from a global so
//! tests and demos can swap it. The developer account picker on the login
//! page reads the same records.

#[cfg(test)]
#[path = "accounts_test.rs"]
mod accounts_test;

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::session::{Identity, SessionUser};

const BUILTIN_ACCOUNTS: &str = include_str!("../fixtures/mock_accounts.json");

/// A fixture account usable in mock mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockAccount {
    pub email: String,
    pub secret: String,
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    /// Short blurb shown in the account picker.
    #[serde(default)]
    pub description: String,
}

impl MockAccount {
    /// Identity id assigned to mock accounts.
    #[must_use]
    pub fn identity_id(&self) -> String {
        format!("mock:{}", normalize_email(&self.email))
    }

    #[must_use]
    pub fn to_user(&self) -> SessionUser {
        SessionUser {
            identity: Identity {
                id: self.identity_id(),
                email: self.email.clone(),
                name: self.name.clone().unwrap_or_else(|| display_name_from_email(&self.email)),
                avatar_url: None,
                department: self.department.clone(),
                position: self.position.clone(),
            },
            role: self.role,
        }
    }
}

/// The set of accounts accepted in mock mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountDirectory {
    accounts: Vec<MockAccount>,
}

impl AccountDirectory {
    #[must_use]
    pub fn new(accounts: Vec<MockAccount>) -> Self {
        Self { accounts }
    }

    /// The accounts bundled with the portal.
    #[must_use]
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_ACCOUNTS) {
            Ok(directory) => directory,
            Err(e) => {
                log::error!("bundled mock accounts are malformed: {e}");
                Self::default()
            }
        }
    }

    /// Parse a JSON array of [`MockAccount`] records.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the JSON is malformed or a role is unknown.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    #[must_use]
    pub fn accounts(&self) -> &[MockAccount] {
        &self.accounts
    }

    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&MockAccount> {
        let wanted = normalize_email(email);
        self.accounts.iter().find(|a| normalize_email(&a.email) == wanted)
    }

    /// Match an email/secret pair. Emails compare case-insensitively; secrets
    /// must match exactly.
    #[must_use]
    pub fn authenticate(&self, email: &str, secret: &str) -> Option<&MockAccount> {
        self.find_by_email(email).filter(|a| a.secret == secret)
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// `"jane.doe@x.com"` -> `"jane.doe"`.
pub(crate) fn display_name_from_email(email: &str) -> String {
    let email = email.trim();
    email.split('@').next().filter(|s| !s.is_empty()).unwrap_or(email).to_owned()
}
