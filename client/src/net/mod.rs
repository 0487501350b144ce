//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` talks to the external identity service over HTTP. It is the
//! only place the client leaves the browser.

pub mod identity;
