//! Dashboard backend port definition.
//!
//! This port defines the interface to the external REST backend. The client
//! is the source of truth for all simulated state; every consumer treats a
//! backend failure as a degraded-but-working condition, never fatal.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catalog::CfrTitle;
use crate::domain::role::Role;

/// Errors that can occur talking to the dashboard backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed with status {status}: {url}")]
    RequestFailed { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Relationship analytics reported by `GET /analytics`.
///
/// Missing fields default to zero so partial backend payloads still render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSummary {
    pub total_regulations: u64,
    pub total_relationships: u64,
    pub conflict_count: u64,
    pub redundancy_count: u64,
}

/// One role as reported by `GET /auth/available-roles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRole {
    pub name: String,
    pub permissions: Vec<String>,
}

/// Port for the external dashboard backend.
#[async_trait]
pub trait BackendPort: Send + Sync {
    /// Best-effort notification that the simulated role changed
    /// (`POST /auth/simulate-role`).
    async fn notify_role_change(&self, role: Role) -> Result<(), ApiError>;

    /// Roles and permission sets as the server sees them
    /// (`GET /auth/available-roles`).
    async fn available_roles(&self) -> Result<Vec<ServerRole>, ApiError>;

    /// CFR title statistics (`GET /cfr/titles`).
    async fn fetch_titles(&self) -> Result<Vec<CfrTitle>, ApiError>;

    /// Relationship analytics (`GET /analytics`).
    async fn fetch_analytics(&self) -> Result<AnalyticsSummary, ApiError>;

    /// Trigger mock-data generation for `title_count` titles
    /// (`POST /generate-mock-data-all-titles-with-relationships/{n}`).
    async fn generate_mock_data(&self, title_count: u32) -> Result<(), ApiError>;
}

/// A backend stub that reports every endpoint as unreachable.
///
/// Suitable for tests and fully-offline operation; consumers exercise their
/// degradation paths against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBackend;

impl NoopBackend {
    /// Create a new no-op backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn unavailable() -> ApiError {
        ApiError::Unavailable("no backend configured".to_string())
    }
}

#[async_trait]
impl BackendPort for NoopBackend {
    async fn notify_role_change(&self, _role: Role) -> Result<(), ApiError> {
        Err(Self::unavailable())
    }

    async fn available_roles(&self) -> Result<Vec<ServerRole>, ApiError> {
        Err(Self::unavailable())
    }

    async fn fetch_titles(&self) -> Result<Vec<CfrTitle>, ApiError> {
        Err(Self::unavailable())
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSummary, ApiError> {
        Err(Self::unavailable())
    }

    async fn generate_mock_data(&self, _title_count: u32) -> Result<(), ApiError> {
        Err(Self::unavailable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_backend_is_always_unavailable() {
        let backend = NoopBackend::new();
        assert!(matches!(
            backend.notify_role_change(Role::Admin).await,
            Err(ApiError::Unavailable(_))
        ));
        assert!(backend.fetch_titles().await.is_err());
    }

    #[test]
    fn test_analytics_defaults_missing_fields_to_zero() {
        let summary: AnalyticsSummary =
            serde_json::from_str(r#"{"totalRegulations": 12}"#).unwrap();
        assert_eq!(summary.total_regulations, 12);
        assert_eq!(summary.conflict_count, 0);
        assert_eq!(summary.redundancy_count, 0);
    }
}
