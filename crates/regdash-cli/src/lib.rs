//! CLI adapter for the regdash client.
//!
//! Parsing, composition, and command handlers live here; `main.rs` only
//! dispatches.

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, RoleCommand, UserCommand};
pub use parser::Cli;
