//! Session resolution and role gating for the HR portal.
//!
//! This crate owns the authentication/authorization core shared by the
//! Leptos `client` and the SSR host. It has no UI dependencies: the client
//! plugs in a signal-backed [`SessionCell`], a browser [`KeyValueStore`], and
//! an HTTP [`IdentityService`], while tests use the in-memory versions.
//!
//! ARCHITECTURE
//! ============
//! - [`resolver::SessionResolver`] produces the [`Session`] and offers
//!   `sign_in` / `sign_out`.
//! - [`gate::AccessGate`] is a pure function of the latest session snapshot
//!   plus a settle counter, yielding one of five [`GateState`]s.

pub mod accounts;
pub mod config;
pub mod gate;
pub mod identity;
pub mod location;
pub mod policy;
pub mod resolver;
pub mod role;
pub mod session;
pub mod store;

pub use accounts::{AccountDirectory, MockAccount};
pub use config::{AuthRoutes, ConfigError, Environment, PortalConfig};
pub use gate::{AccessGate, DeniedNotice, GateState, MountDebounce, UnauthenticatedAction};
pub use identity::{
    IdentityError, IdentityService, InMemoryIdentityService, SessionChange, SessionChannel, SessionWatch,
    Subscription,
};
pub use location::{BypassParams, Location};
pub use policy::{AccessPolicy, Fallback, PolicyError};
pub use resolver::{AuthError, SessionResolver};
pub use role::{Role, RoleParseError};
pub use session::{Identity, Session, SessionCell, SessionUser, SharedSession};
pub use store::{KeyValueStore, MemoryStore, NoopStore, StorageError};
