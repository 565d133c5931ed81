//! Simulated user identities.
//!
//! A fixed catalog of test personas stands in for real authentication so AI
//! features can be exercised per role before a production identity provider
//! exists. Not an authentication mechanism.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// A simulated user identity.
///
/// Serialized camelCase to stay compatible with the persisted profile
/// documents written by earlier clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedUser {
    /// Stable unique id (`admin-001`, `analyst-001`, ...).
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub avatar_color: String,
    pub avatar_initials: String,
}

/// The fixed catalog of simulated users.
///
/// Five entries; no creation or deletion at runtime.
#[derive(Debug, Clone)]
pub struct UserCatalog {
    users: Vec<SimulatedUser>,
}

impl UserCatalog {
    /// The built-in five-persona catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let users = vec![
            SimulatedUser {
                id: "admin-001".to_string(),
                username: "admin".to_string(),
                display_name: "Sarah Chen".to_string(),
                email: "sarah.chen@usds.gov".to_string(),
                role: Role::Admin,
                department: "USDS Leadership".to_string(),
                avatar_color: "#1e40af".to_string(),
                avatar_initials: "SC".to_string(),
            },
            SimulatedUser {
                id: "analyst-001".to_string(),
                username: "analyst1".to_string(),
                display_name: "Marcus Rodriguez".to_string(),
                email: "marcus.rodriguez@usds.gov".to_string(),
                role: Role::Analyst,
                department: "Regulatory Analysis".to_string(),
                avatar_color: "#059669".to_string(),
                avatar_initials: "MR".to_string(),
            },
            SimulatedUser {
                id: "analyst-002".to_string(),
                username: "analyst2".to_string(),
                display_name: "Emily Washington".to_string(),
                email: "emily.washington@usds.gov".to_string(),
                role: Role::Analyst,
                department: "Regulatory Analysis".to_string(),
                avatar_color: "#7c3aed".to_string(),
                avatar_initials: "EW".to_string(),
            },
            SimulatedUser {
                id: "auditor-001".to_string(),
                username: "auditor".to_string(),
                display_name: "James Thompson".to_string(),
                email: "james.thompson@usds.gov".to_string(),
                role: Role::Auditor,
                department: "Compliance & Audit".to_string(),
                avatar_color: "#dc2626".to_string(),
                avatar_initials: "JT".to_string(),
            },
            SimulatedUser {
                id: "visitor-001".to_string(),
                username: "visitor".to_string(),
                display_name: "Guest User".to_string(),
                email: "guest@example.com".to_string(),
                role: Role::Visitor,
                department: "Public Access".to_string(),
                avatar_color: "#64748b".to_string(),
                avatar_initials: "GU".to_string(),
            },
        ];
        Self { users }
    }

    /// All catalog entries, in fixed order.
    #[must_use]
    pub fn all(&self) -> &[SimulatedUser] {
        &self.users
    }

    /// Look up a user by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&SimulatedUser> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look up a user by username.
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<&SimulatedUser> {
        self.users.iter().find(|u| u.username == username)
    }

    /// The default signed-in persona (catalog entry index 1, the first
    /// analyst) used when nothing valid is persisted.
    #[must_use]
    pub fn default_persona(&self) -> Option<&SimulatedUser> {
        self.users.get(1)
    }
}

impl Default for UserCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_fixed_entries() {
        let catalog = UserCatalog::builtin();
        assert_eq!(catalog.all().len(), 5);

        let usernames: Vec<&str> = catalog.all().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(
            usernames,
            ["admin", "analyst1", "analyst2", "auditor", "visitor"]
        );
    }

    #[test]
    fn test_lookup_by_id_and_username_agree() {
        let catalog = UserCatalog::builtin();
        let by_name = catalog.find_by_username("auditor").unwrap();
        let by_id = catalog.find_by_id(&by_name.id).unwrap();
        assert_eq!(by_name, by_id);
        assert_eq!(by_id.role, Role::Auditor);

        assert!(catalog.find_by_id("nobody-999").is_none());
        assert!(catalog.find_by_username("nobody").is_none());
    }

    #[test]
    fn test_default_persona_is_first_analyst() {
        let catalog = UserCatalog::builtin();
        let persona = catalog.default_persona().unwrap();
        assert_eq!(persona.id, "analyst-001");
        assert_eq!(persona.role, Role::Analyst);
    }

    #[test]
    fn test_user_round_trips_camel_case() {
        let catalog = UserCatalog::builtin();
        let user = catalog.find_by_username("admin").unwrap();

        let json = serde_json::to_string(user).unwrap();
        assert!(json.contains("\"displayName\":\"Sarah Chen\""));
        assert!(json.contains("\"avatarColor\":\"#1e40af\""));
        assert!(json.contains("\"role\":\"ADMIN\""));

        let back: SimulatedUser = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, user);
    }
}
