//! Core domain types, ports, and services for the regdash client.
//!
//! This crate holds the pure application core of the regulatory-analysis
//! dashboard client: the role/permission registry, the simulated user
//! catalog, role/user session state with change notification, and the
//! per-user chat conversation store. Infrastructure (file storage, HTTP,
//! terminal) lives in the adapter crates and plugs in through the traits
//! defined under [`ports`].

pub mod domain;
pub mod ports;
pub mod services;
pub mod subscribe;

// Re-export commonly used types for convenience
pub use domain::{
    CfrTitle, ChatMessage, Conversation, MessageRole, Role, RoleConfig, SimulatedUser,
    TITLE_MAX_CHARS, UserCatalog, agency_seal, bundled_titles, config_for, derive_title,
    generate_id, permissions, truncate_text, unique_agencies,
};
pub use ports::{
    AnalyticsSummary, ApiError, AssistantError, AssistantPort, AssistantReply, BackendPort,
    KeyValueStore, NoopBackend, ServerRole, StoreError, keys,
};
pub use services::{
    AvatarStyle, ChatExchange, ConversationError, ConversationStore, RoleSession, SIMULATED_MODEL,
    SessionError, SimulatedAssistant, UserSession,
};
pub use subscribe::{Listeners, SubscriberId};
