//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (storage, network, terminal).
//!
//! # Structure
//!
//! - `role` - Roles, display configs, and the fixed permission table
//! - `user` - Simulated user identities and the fixed catalog
//! - `chat` - Chat conversation and message types
//! - `catalog` - Bundled CFR title catalog (offline fallback)

pub mod catalog;
pub mod chat;
pub mod role;
pub mod user;

// Re-export role types at the domain level for convenience
pub use role::{Role, RoleConfig, config_for, permissions};

// Re-export user types at the domain level for convenience
pub use user::{SimulatedUser, UserCatalog};

// Re-export chat types at the domain level for convenience
pub use chat::{
    ChatMessage, Conversation, MessageRole, TITLE_MAX_CHARS, derive_title, generate_id,
    truncate_text,
};

// Re-export catalog types at the domain level for convenience
pub use catalog::{CfrTitle, agency_seal, bundled_titles, unique_agencies};
