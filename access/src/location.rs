//! Route context: the current path, its query parameters and redirect targets.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use std::collections::BTreeMap;

use crate::accounts::{display_name_from_email, normalize_email};
use crate::config::AuthRoutes;
use crate::role::{Role, RoleParseError};
use crate::session::{Identity, SessionUser};

pub const BYPASS_EMAIL_PARAM: &str = "mockEmail";
pub const BYPASS_ROLE_PARAM: &str = "mockRole";
pub const BYPASS_NAME_PARAM: &str = "mockName";
pub const BYPASS_FLAG_PARAM: &str = "mockBypass";
pub const REDIRECT_PARAM: &str = "redirect";

/// A parsed request target (`/path?query`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: BTreeMap<String, String>,
}

impl Location {
    /// Parse `path?query#fragment`. Query values are percent-decoded; the
    /// first occurrence of a key wins.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.split('#').next().unwrap_or_default();
        let (path, search) = raw.split_once('?').unwrap_or((raw, ""));
        Self::from_parts(path, search)
    }

    /// Build from a path and a search string (with or without leading `?`).
    #[must_use]
    pub fn from_parts(path: &str, search: &str) -> Self {
        let path = if path.is_empty() { "/".to_owned() } else { path.to_owned() };
        let mut query = BTreeMap::new();
        for pair in search.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode_component(key), decode_component(value)) else {
                continue;
            };
            query.entry(key).or_insert(value);
        }
        Self { path, query }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Whether this is the login or logout route (possibly under a prefix).
    #[must_use]
    pub fn is_auth_entry(&self, routes: &AuthRoutes) -> bool {
        let path = self.path.trim_end_matches('/');
        [routes.login.as_str(), routes.logout.as_str()]
            .into_iter()
            .map(|route| route.trim_end_matches('/'))
            .filter(|route| route.len() > 1 && route.starts_with('/'))
            .any(|route| path.ends_with(route))
    }

    /// The original target, re-encoded.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let search = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{search}", self.path)
    }
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " ")).ok().map(|s| s.into_owned())
}

/// `login?redirect=<return_to>`.
#[must_use]
pub fn login_redirect(login_route: &str, return_to: &str) -> String {
    format!("{login_route}?{REDIRECT_PARAM}={}", urlencoding::encode(return_to))
}

/// Accept only same-origin absolute paths as post-login targets.
#[must_use]
pub fn safe_return_target(raw: Option<&str>, home: &str) -> String {
    match raw.map(str::trim) {
        Some(target) if target.starts_with('/') && !target.starts_with("//") && !target.contains('\\') => {
            target.to_owned()
        }
        _ => home.to_owned(),
    }
}

/// Developer bypass parameters seeding a synthetic identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BypassParams {
    pub email: String,
    pub role: String,
    pub name: Option<String>,
}

impl BypassParams {
    /// Extract bypass parameters. Returns `None` unless `mockBypass=true` and
    /// both `mockEmail` and `mockRole` are present.
    #[must_use]
    pub fn from_location(location: &Location) -> Option<Self> {
        if location.query(BYPASS_FLAG_PARAM).map(str::trim) != Some("true") {
            return None;
        }
        let email = location.query(BYPASS_EMAIL_PARAM).map(str::trim).filter(|s| !s.is_empty())?;
        let role = location.query(BYPASS_ROLE_PARAM).map(str::trim).filter(|s| !s.is_empty())?;
        let name = location
            .query(BYPASS_NAME_PARAM)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        Some(Self { email: email.to_owned(), role: role.to_owned(), name })
    }

    /// Build the synthetic user.
    ///
    /// # Errors
    ///
    /// Returns [`RoleParseError`] if `mockRole` is not a known role.
    pub fn into_user(self) -> Result<SessionUser, RoleParseError> {
        let role: Role = self.role.parse()?;
        let name = self.name.unwrap_or_else(|| display_name_from_email(&self.email));
        Ok(SessionUser {
            identity: Identity {
                id: format!("bypass:{}", normalize_email(&self.email)),
                email: self.email,
                name,
                avatar_url: None,
                department: None,
                position: None,
            },
            role,
        })
    }
}
