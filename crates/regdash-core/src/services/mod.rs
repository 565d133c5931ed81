//! Core services - the application's session and conversation logic.
//!
//! Services are owned state objects injected into consumers (no ambient
//! globals). They orchestrate between ports and domain logic and never
//! know about concrete infrastructure.

mod assistant;
mod conversations;
mod role_session;
mod user_session;

use thiserror::Error;

pub use assistant::{SIMULATED_MODEL, SimulatedAssistant};
pub use conversations::{ChatExchange, ConversationError, ConversationStore};
pub use role_session::RoleSession;
pub use user_session::{AvatarStyle, UserSession};

/// Errors from role/user session operations.
///
/// Both sessions report lookup misses the same way: a typed error the
/// caller decides whether to surface.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid role: {}. Available roles: {}", .requested, .available.join(", "))]
    UnknownRole {
        requested: String,
        available: Vec<String>,
    },

    #[error("User not found: {requested}")]
    UnknownUser { requested: String },
}
