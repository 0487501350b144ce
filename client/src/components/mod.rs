//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render portal chrome and the access gate while reading the
//! shared auth context.

pub mod error_boundary;
pub mod nav;
pub mod require_role;
pub mod status;
