//! Key-value profile store port.
//!
//! Abstracts the per-profile key-value storage so session and conversation
//! logic stays testable without a concrete storage backend. Implementations
//! handle all I/O details.

use async_trait::async_trait;
use thiserror::Error;

/// Well-known storage keys.
///
/// Keys are filesystem-safe by construction so file-backed implementations
/// can use them verbatim.
pub mod keys {
    /// Current simulated role (raw role name).
    pub const SIMULATED_ROLE: &str = "simulated_role";

    /// Current simulated user (JSON document).
    pub const SIMULATED_USER: &str = "simulated_user";

    /// Prefix for per-user conversation lists (JSON documents).
    pub const CONVERSATIONS_PREFIX: &str = "conversations_";

    /// Role-switcher panel minimization flag (`"true"` / `"false"`).
    pub const ROLE_SWITCHER_MINIMIZED: &str = "role_switcher_minimized";

    /// Conversation-list key for one user.
    #[must_use]
    pub fn conversations(user_id: &str) -> String {
        format!("{CONVERSATIONS_PREFIX}{user_id}")
    }
}

/// Errors that can occur in profile store operations.
///
/// Consumers treat every store failure as non-fatal: reads degrade to
/// defaults and writes are logged and swallowed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for profile key-value persistence.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
