//! Role and permission registry.
//!
//! The four simulated roles, their display configuration, and the fixed
//! role-to-permission table. The table is assigned once at compile time and
//! never mutated at runtime.

use serde::{Deserialize, Serialize};

/// Permission tags understood by the registry.
///
/// Tags are opaque strings; gating code compares them verbatim.
pub mod permissions {
    pub const GENERATE_DATA: &str = "generate:data";
    pub const DOWNLOAD_FILES: &str = "download:files";
    pub const VIEW_ALL: &str = "view:all";
    pub const VIEW_PUBLIC: &str = "view:public";
    pub const MANAGE_USERS: &str = "admin:users";
    pub const EXPORT_REPORTS: &str = "export:reports";
    pub const EXPORT_CSV: &str = "export:csv";

    /// Every known permission tag.
    pub const ALL: [&str; 7] = [
        GENERATE_DATA,
        DOWNLOAD_FILES,
        VIEW_ALL,
        VIEW_PUBLIC,
        MANAGE_USERS,
        EXPORT_REPORTS,
        EXPORT_CSV,
    ];
}

/// A simulated access role.
///
/// The set of four is fixed; there is no runtime role creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Analyst,
    Auditor,
    Visitor,
}

/// Static display configuration for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleConfig {
    pub name: &'static str,
    pub display_name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

const ADMIN_CONFIG: RoleConfig = RoleConfig {
    name: "ADMIN",
    display_name: "Administrator",
    color: "#dc3545",
    description: "Full system access with all privileges",
};

const ANALYST_CONFIG: RoleConfig = RoleConfig {
    name: "ANALYST",
    display_name: "Data Analyst",
    color: "#007bff",
    description: "Can generate data and view analytics",
};

const AUDITOR_CONFIG: RoleConfig = RoleConfig {
    name: "AUDITOR",
    display_name: "Compliance Auditor",
    color: "#28a745",
    description: "Read-only access with export capabilities",
};

const VISITOR_CONFIG: RoleConfig = RoleConfig {
    name: "VISITOR",
    display_name: "Public Visitor",
    color: "#6c757d",
    description: "Limited read-only access",
};

impl Role {
    /// All roles, in canonical order.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Analyst, Self::Auditor, Self::Visitor];

    /// Parse a role from a string, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "ANALYST" => Some(Self::Analyst),
            "AUDITOR" => Some(Self::Auditor),
            "VISITOR" => Some(Self::Visitor),
            _ => None,
        }
    }

    /// Canonical upper-case role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Analyst => "ANALYST",
            Self::Auditor => "AUDITOR",
            Self::Visitor => "VISITOR",
        }
    }

    /// Display configuration for this role.
    #[must_use]
    pub const fn config(&self) -> &'static RoleConfig {
        match self {
            Self::Admin => &ADMIN_CONFIG,
            Self::Analyst => &ANALYST_CONFIG,
            Self::Auditor => &AUDITOR_CONFIG,
            Self::Visitor => &VISITOR_CONFIG,
        }
    }

    /// The fixed permission set granted to this role.
    #[must_use]
    pub const fn permissions(&self) -> &'static [&'static str] {
        match self {
            Self::Admin => &permissions::ALL,
            Self::Analyst => &[
                permissions::GENERATE_DATA,
                permissions::VIEW_ALL,
                permissions::EXPORT_REPORTS,
            ],
            Self::Auditor => &[
                permissions::VIEW_ALL,
                permissions::EXPORT_REPORTS,
                permissions::EXPORT_CSV,
            ],
            Self::Visitor => &[permissions::VIEW_PUBLIC],
        }
    }

    /// Whether this role grants the given permission tag.
    ///
    /// Unknown tags are simply absent from every set.
    #[must_use]
    pub fn has_permission(&self, tag: &str) -> bool {
        self.permissions().contains(&tag)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display configuration for a role name, falling back to the VISITOR
/// config when the name is unknown.
#[must_use]
pub fn config_for(name: &str) -> &'static RoleConfig {
    Role::parse(name).map_or(&VISITOR_CONFIG, |role| role.config())
}
