//! Role-simulation session.
//!
//! Owns the process-wide current role, answers permission checks against
//! the fixed registry table, and notifies subscribers on every switch.
//! Client-side state is authoritative: the backend notification is
//! best-effort and a failure never propagates.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::domain::role::{Role, RoleConfig, permissions};
use crate::ports::backend::BackendPort;
use crate::ports::key_value::{KeyValueStore, keys};
use crate::subscribe::{Listeners, SubscriberId};

use super::SessionError;

/// Session state for the simulated role.
pub struct RoleSession {
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn BackendPort>,
    current: Mutex<Role>,
    listeners: Listeners<Role>,
}

impl RoleSession {
    /// Load the session from the profile store.
    ///
    /// An absent, unreadable, or unparsable persisted role degrades to
    /// VISITOR.
    pub async fn load(store: Arc<dyn KeyValueStore>, backend: Arc<dyn BackendPort>) -> Self {
        let current = match store.get(keys::SIMULATED_ROLE).await {
            Ok(Some(raw)) => Role::parse(&raw).unwrap_or_else(|| {
                warn!(stored = %raw, "persisted role is not a known role, defaulting to VISITOR");
                Role::Visitor
            }),
            Ok(None) => Role::Visitor,
            Err(err) => {
                warn!(error = %err, "failed to read persisted role, defaulting to VISITOR");
                Role::Visitor
            }
        };

        Self {
            store,
            backend,
            current: Mutex::new(current),
            listeners: Listeners::new(),
        }
    }

    /// Switch the simulated role.
    ///
    /// The name is validated case-insensitively against the four known
    /// roles. On success the in-memory state updates first, then the new
    /// role is persisted (write failures are logged and swallowed), every
    /// subscriber is invoked synchronously in registration order, and
    /// finally the backend is notified best-effort.
    pub async fn simulate_role(&self, input: &str) -> Result<Role, SessionError> {
        let role = Role::parse(input).ok_or_else(|| SessionError::UnknownRole {
            requested: input.to_string(),
            available: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
        })?;

        *self.lock_current() = role;
        debug!(role = %role, "simulated role switched");

        if let Err(err) = self.store.set(keys::SIMULATED_ROLE, role.as_str()).await {
            warn!(error = %err, "failed to persist simulated role");
        }

        self.listeners.notify(&role);

        if let Err(err) = self.backend.notify_role_change(role).await {
            warn!(
                error = %err,
                "server role simulation failed, continuing with client-side simulation"
            );
        }

        Ok(role)
    }

    /// The current simulated role.
    #[must_use]
    pub fn current_role(&self) -> Role {
        *self.lock_current()
    }

    /// Display configuration for the current role.
    #[must_use]
    pub fn role_config(&self) -> &'static RoleConfig {
        self.current_role().config()
    }

    /// Canonical names of all switchable roles.
    #[must_use]
    pub fn available_roles(&self) -> [&'static str; 4] {
        [
            Role::Admin.as_str(),
            Role::Analyst.as_str(),
            Role::Auditor.as_str(),
            Role::Visitor.as_str(),
        ]
    }

    /// Whether the current role grants the given permission tag.
    ///
    /// Pure lookup; unknown tags return false.
    #[must_use]
    pub fn has_permission(&self, tag: &str) -> bool {
        self.current_role().has_permission(tag)
    }

    /// Whether the current role may generate data.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.has_permission(permissions::GENERATE_DATA)
    }

    /// Whether the current role may download files.
    #[must_use]
    pub fn can_download(&self) -> bool {
        self.has_permission(permissions::DOWNLOAD_FILES)
    }

    /// Whether the current role may view all records.
    #[must_use]
    pub fn can_view_all(&self) -> bool {
        self.has_permission(permissions::VIEW_ALL)
    }

    /// Whether the current role may export reports.
    #[must_use]
    pub fn can_export_reports(&self) -> bool {
        self.has_permission(permissions::EXPORT_REPORTS)
    }

    /// Whether the current role may manage users.
    #[must_use]
    pub fn can_manage_users(&self) -> bool {
        self.has_permission(permissions::MANAGE_USERS)
    }

    /// Whether the current role may export CSV data.
    #[must_use]
    pub fn can_export_csv(&self) -> bool {
        self.has_permission(permissions::EXPORT_CSV)
    }

    /// Subscribe to role changes. Subscribers only hear future switches.
    pub fn on_role_change(
        &self,
        callback: impl Fn(&Role) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.listeners.subscribe(callback)
    }

    /// Remove a role-change subscriber.
    pub fn remove_listener(&self, id: SubscriberId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Role> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
