//! HTTP adapter for the external identity service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning a service error, since the session
//! cookie only exists in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses become [`IdentityError::Service`] with the status in
//! the message, except `401` on sign-in which is
//! [`IdentityError::InvalidCredentials`]. Role tags are parsed here so an
//! unknown tag surfaces as [`IdentityError::UnknownRole`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::Arc;

#[cfg(feature = "hydrate")]
use access::SessionChange;
use access::{Identity, IdentityError, IdentityService, Role, SessionChannel, SessionWatch};
use async_trait::async_trait;
#[cfg(any(test, feature = "hydrate"))]
use serde::{Deserialize, Serialize};

/// `GET {base}/session` response body.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    user: Option<Identity>,
}

/// `POST {base}/sign-in` request body.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    credential: &'a str,
    secret: &'a str,
}

/// `GET {base}/users/{id}/role` response body.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RoleResponse {
    role: String,
}

fn session_endpoint(base: &str) -> String {
    format!("{base}/session")
}

fn sign_in_endpoint(base: &str) -> String {
    format!("{base}/sign-in")
}

fn sign_out_endpoint(base: &str) -> String {
    format!("{base}/sign-out")
}

fn role_endpoint(base: &str, identity_id: &str) -> String {
    format!("{base}/users/{}/role", urlencoding::encode(identity_id))
}

#[cfg(any(test, feature = "hydrate"))]
fn status_error(action: &str, status: u16) -> IdentityError {
    IdentityError::Service(format!("{action} failed: {status}"))
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_session(raw: &str) -> Result<Option<Identity>, IdentityError> {
    serde_json::from_str::<SessionResponse>(raw)
        .map(|body| body.user)
        .map_err(|e| IdentityError::Service(format!("invalid session response: {e}")))
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_role(raw: &str) -> Result<Role, IdentityError> {
    let body: RoleResponse =
        serde_json::from_str(raw).map_err(|e| IdentityError::Service(format!("invalid role response: {e}")))?;
    Ok(body.role.parse::<Role>()?)
}

/// Identity service reached over HTTP at `base_url`.
pub struct HttpIdentityService {
    base_url: String,
    channel: Arc<SessionChannel>,
}

impl HttpIdentityService {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), channel: SessionChannel::new() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl IdentityService for HttpIdentityService {
    async fn current_session(&self) -> Result<Option<Identity>, IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&session_endpoint(&self.base_url))
                .send()
                .await
                .map_err(|e| IdentityError::Service(e.to_string()))?;
            if resp.status() == 401 {
                return Ok(None);
            }
            if !resp.ok() {
                return Err(status_error("session request", resp.status()));
            }
            let raw = resp.text().await.map_err(|e| IdentityError::Service(e.to_string()))?;
            parse_session(&raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable(&session_endpoint(&self.base_url)))
        }
    }

    async fn sign_in_with_credential(&self, credential: &str, secret: &str) -> Result<Identity, IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let body = SignInRequest { credential, secret };
            let resp = gloo_net::http::Request::post(&sign_in_endpoint(&self.base_url))
                .json(&body)
                .map_err(|e| IdentityError::Service(e.to_string()))?
                .send()
                .await
                .map_err(|e| IdentityError::Service(e.to_string()))?;
            if resp.status() == 401 {
                return Err(IdentityError::InvalidCredentials);
            }
            if !resp.ok() {
                return Err(status_error("sign-in", resp.status()));
            }
            let identity = resp.json::<Identity>().await.map_err(|e| IdentityError::Service(e.to_string()))?;
            self.channel.publish(&SessionChange::SignedIn(identity.clone()));
            Ok(identity)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (credential, secret);
            Err(unavailable(&sign_in_endpoint(&self.base_url)))
        }
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&sign_out_endpoint(&self.base_url))
                .send()
                .await
                .map_err(|e| IdentityError::Service(e.to_string()))?;
            if !resp.ok() {
                return Err(status_error("sign-out", resp.status()));
            }
            self.channel.publish(&SessionChange::SignedOut);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable(&sign_out_endpoint(&self.base_url)))
        }
    }

    async fn role_of(&self, identity_id: &str) -> Result<Role, IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&role_endpoint(&self.base_url, identity_id))
                .send()
                .await
                .map_err(|e| IdentityError::Service(e.to_string()))?;
            if !resp.ok() {
                return Err(status_error("role lookup", resp.status()));
            }
            let raw = resp.text().await.map_err(|e| IdentityError::Service(e.to_string()))?;
            parse_role(&raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable(&role_endpoint(&self.base_url, identity_id)))
        }
    }

    fn on_session_change(&self) -> SessionWatch {
        self.channel.subscribe()
    }
}

#[cfg(not(feature = "hydrate"))]
fn unavailable(url: &str) -> IdentityError {
    IdentityError::Service(format!("{url} is only reachable from the browser"))
}
