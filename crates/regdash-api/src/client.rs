//! Dashboard backend client implementing the core `BackendPort`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use regdash_core::domain::catalog::{CfrTitle, agency_seal};
use regdash_core::domain::role::Role;
use regdash_core::ports::backend::{AnalyticsSummary, ApiError, BackendPort, ServerRole};

use crate::config::ApiClientConfig;
use crate::http::HttpClient;

/// REST client for the dashboard backend.
pub struct DashboardApiClient {
    http: HttpClient,
    base_url: String,
}

impl DashboardApiClient {
    /// Create a client from the given configuration.
    #[must_use]
    pub fn new(config: ApiClientConfig) -> Self {
        let http = HttpClient::new(&config);
        Self {
            http,
            base_url: config.base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

/// One CFR title row as the backend reports it.
///
/// The backend names the title field `title`; statistics may be absent on
/// older deployments and default to zero.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitleRow {
    number: u16,
    title: String,
    agency: String,
    #[serde(default)]
    regulation_count: u64,
    #[serde(default)]
    total_word_count: u64,
    #[serde(default)]
    average_word_count: u64,
    #[serde(default)]
    conflict_count: u64,
    #[serde(default)]
    last_updated: String,
}

impl From<TitleRow> for CfrTitle {
    fn from(row: TitleRow) -> Self {
        let seal = Some(agency_seal(&row.agency).to_string());
        Self {
            number: row.number,
            name: row.title,
            agency: row.agency,
            regulation_count: row.regulation_count,
            total_word_count: row.total_word_count,
            average_word_count: row.average_word_count,
            conflict_count: row.conflict_count,
            last_updated: row.last_updated,
            seal,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AvailableRolesResponse {
    #[serde(default)]
    roles: HashMap<String, ServerRoleRow>,
}

#[derive(Debug, Deserialize)]
struct ServerRoleRow {
    #[serde(default)]
    permissions: HashMap<String, serde_json::Value>,
}

#[async_trait]
impl BackendPort for DashboardApiClient {
    async fn notify_role_change(&self, role: Role) -> Result<(), ApiError> {
        let url = self.endpoint("auth/simulate-role");
        self.http
            .post_json(&url, &json!({ "role": role.as_str() }))
            .await
    }

    async fn available_roles(&self) -> Result<Vec<ServerRole>, ApiError> {
        let url = self.endpoint("auth/available-roles");
        let response: AvailableRolesResponse = self.http.get_json(&url).await?;

        let mut roles: Vec<ServerRole> = response
            .roles
            .into_iter()
            .map(|(name, row)| {
                let mut permissions: Vec<String> = row.permissions.into_keys().collect();
                permissions.sort_unstable();
                ServerRole { name, permissions }
            })
            .collect();
        roles.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn fetch_titles(&self) -> Result<Vec<CfrTitle>, ApiError> {
        let url = self.endpoint("cfr/titles");
        let rows: Vec<TitleRow> = self.http.get_json(&url).await?;
        Ok(rows.into_iter().map(CfrTitle::from).collect())
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSummary, ApiError> {
        let url = self.endpoint("analytics");
        self.http.get_json(&url).await
    }

    async fn generate_mock_data(&self, title_count: u32) -> Result<(), ApiError> {
        let url = self.endpoint(&format!(
            "generate-mock-data-all-titles-with-relationships/{title_count}"
        ));
        self.http.post_empty(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_row_maps_to_domain_type() {
        let json = r#"{
            "number": 40,
            "title": "Protection of Environment",
            "agency": "Environmental Protection Agency",
            "regulationCount": 31,
            "conflictCount": 2
        }"#;

        let row: TitleRow = serde_json::from_str(json).unwrap();
        let title = CfrTitle::from(row);

        assert_eq!(title.number, 40);
        assert_eq!(title.name, "Protection of Environment");
        assert_eq!(title.regulation_count, 31);
        assert_eq!(title.conflict_count, 2);
        // Absent statistics default to zero.
        assert_eq!(title.total_word_count, 0);
        assert_eq!(title.seal.as_deref(), Some("epa.png"));
    }

    #[test]
    fn test_available_roles_payload_parses_permission_keys() {
        let json = r#"{
            "roles": {
                "ANALYST": {"permissions": {"view:all": true, "generate:data": {}}},
                "VISITOR": {}
            }
        }"#;

        let response: AvailableRolesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.roles.len(), 2);

        let analyst = &response.roles["ANALYST"];
        let mut tags: Vec<&str> = analyst.permissions.keys().map(String::as_str).collect();
        tags.sort_unstable();
        assert_eq!(tags, ["generate:data", "view:all"]);
        assert!(response.roles["VISITOR"].permissions.is_empty());
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let client = DashboardApiClient::new(
            ApiClientConfig::new().with_base_url("http://example.test/api/"),
        );
        assert_eq!(
            client.endpoint("cfr/titles"),
            "http://example.test/api/cfr/titles"
        );
    }
}
