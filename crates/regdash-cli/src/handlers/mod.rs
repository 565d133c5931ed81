//! Command handlers.
//!
//! Each handler receives the composed [`CliContext`] and delegates to the
//! core services; no handler touches infrastructure directly.
//!
//! [`CliContext`]: crate::bootstrap::CliContext

pub mod analytics;
pub mod chat;
pub mod generate;
pub mod role;
pub mod titles;
pub mod user;
