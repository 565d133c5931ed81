//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - File-backed profile store (via regdash-store)
//! - Backend REST client (via regdash-api)
//! - Session and conversation services (via regdash-core)
//!
//! Command handlers receive the fully-composed context and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use regdash_api::{ApiClientConfig, DashboardApiClient};
use regdash_core::ports::backend::BackendPort;
use regdash_core::ports::key_value::KeyValueStore;
use regdash_core::services::{ConversationStore, RoleSession, SimulatedAssistant, UserSession};
use regdash_store::FileStore;

const DEFAULT_API_URL: &str = "http://localhost:8081/api";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding the persisted profile state.
    pub data_dir: PathBuf,
    /// Base URL of the dashboard backend.
    pub api_url: String,
}

impl CliConfig {
    /// Resolve the configuration from CLI overrides and platform defaults.
    pub fn resolve(data_dir: Option<PathBuf>, api_url: Option<String>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .context("could not determine a data directory for this platform")?
                .join("regdash"),
        };
        Ok(Self {
            data_dir,
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Profile store, for view-layer keys like the panel minimize flag.
    pub store: Arc<dyn KeyValueStore>,
    /// Backend client for titles/analytics/generation.
    pub backend: Arc<dyn BackendPort>,
    /// Role-simulation session.
    pub roles: Arc<RoleSession>,
    /// User-simulation session.
    pub users: Arc<UserSession>,
    /// Conversation store for the chat view.
    pub conversations: ConversationStore,
}

/// Bootstrap the CLI application.
///
/// Creates the profile store, composes the backend client, and loads both
/// sessions from persisted state.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let file_store = FileStore::new(&config.data_dir);
    file_store
        .ensure_root()
        .await
        .with_context(|| format!("failed to prepare {}", config.data_dir.display()))?;
    debug!(data_dir = %config.data_dir.display(), api_url = %config.api_url, "bootstrapping");

    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);
    let backend: Arc<dyn BackendPort> =
        Arc::new(DashboardApiClient::new(ApiClientConfig::new().with_base_url(&config.api_url)));

    let roles = Arc::new(RoleSession::load(store.clone(), backend.clone()).await);
    let users = Arc::new(UserSession::load(store.clone()).await);
    let conversations = ConversationStore::new(
        store.clone(),
        users.clone(),
        Arc::new(SimulatedAssistant::new()),
    );

    Ok(CliContext {
        store,
        backend,
        roles,
        users,
        conversations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use regdash_core::Role;

    #[test]
    fn test_resolve_prefers_explicit_values() {
        let config = CliConfig::resolve(
            Some(PathBuf::from("/tmp/profile")),
            Some("http://backend:9999/api".to_string()),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/profile"));
        assert_eq!(config.api_url, "http://backend:9999/api");
    }

    #[tokio::test]
    async fn test_bootstrap_composes_working_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::resolve(Some(dir.path().to_path_buf()), None).unwrap();

        let ctx = bootstrap(config).await.unwrap();
        assert_eq!(ctx.roles.current_role(), Role::Visitor);
        assert_eq!(ctx.users.current_user().unwrap().id, "analyst-001");
    }
}
