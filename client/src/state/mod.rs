//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` owns the session signal and the resolver behind it, `config` the
//! build-time portal settings, and `sections` the static table of portal
//! areas each gated by its own access policy.

pub mod auth;
pub mod config;
pub mod sections;
