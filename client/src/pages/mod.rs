//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates gating and
//! chrome to `components`. Protected pages wrap their body in
//! `RequireRole`; `login` and `logout` are always reachable.

pub mod dashboard;
pub mod login;
pub mod logout;
pub mod sections;
