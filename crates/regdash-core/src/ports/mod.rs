//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No reqwest/filesystem types in any signature
//! - Traits are minimal and intent-based
//! - Every port failure has a defined degradation path in the services

pub mod assistant;
pub mod backend;
pub mod key_value;

// Re-export port traits and types for convenience
pub use assistant::{AssistantError, AssistantPort, AssistantReply};
pub use backend::{AnalyticsSummary, ApiError, BackendPort, NoopBackend, ServerRole};
pub use key_value::{KeyValueStore, StoreError, keys};
