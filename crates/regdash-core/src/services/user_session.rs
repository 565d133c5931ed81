//! User-simulation session.
//!
//! Owns the process-wide current user, drawn from the fixed catalog, and
//! broadcasts changes with latest-value semantics: new subscribers
//! immediately receive the current value. Persists under a key distinct
//! from the role key.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::domain::role::Role;
use crate::domain::user::{SimulatedUser, UserCatalog};
use crate::ports::key_value::{KeyValueStore, keys};
use crate::subscribe::{Listeners, SubscriberId};

use super::SessionError;

/// Avatar colors for rendering the current user's badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarStyle {
    pub background_color: String,
    pub color: String,
}

const AVATAR_FALLBACK_COLOR: &str = "#64748b";

/// Session state for the simulated user.
pub struct UserSession {
    store: Arc<dyn KeyValueStore>,
    catalog: UserCatalog,
    current: Mutex<Option<SimulatedUser>>,
    listeners: Listeners<Option<SimulatedUser>>,
}

impl UserSession {
    /// Load the session from the profile store.
    ///
    /// A persisted user whose id no longer resolves in the catalog is
    /// dropped; with nothing valid persisted the default persona (catalog
    /// entry index 1) signs in and is persisted.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let catalog = UserCatalog::builtin();
        let stored = Self::read_stored_user(store.as_ref(), &catalog).await;
        let initial = stored.or_else(|| catalog.default_persona().cloned());

        let session = Self {
            store,
            catalog,
            current: Mutex::new(initial.clone()),
            listeners: Listeners::new(),
        };

        if let Some(user) = initial {
            session.persist_user(&user).await;
        }
        session
    }

    async fn read_stored_user(
        store: &dyn KeyValueStore,
        catalog: &UserCatalog,
    ) -> Option<SimulatedUser> {
        let raw = match store.get(keys::SIMULATED_USER).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "failed to read persisted user");
                return None;
            }
        };

        match serde_json::from_str::<SimulatedUser>(&raw) {
            // Re-resolve through the catalog so stale profile data is
            // replaced by the current catalog entry.
            Ok(user) => match catalog.find_by_id(&user.id) {
                Some(found) => Some(found.clone()),
                None => {
                    warn!(user_id = %user.id, "persisted user no longer in catalog");
                    None
                }
            },
            Err(err) => {
                warn!(error = %err, "failed to parse persisted user");
                None
            }
        }
    }

    /// The current user, if signed in.
    #[must_use]
    pub fn current_user(&self) -> Option<SimulatedUser> {
        self.lock_current().clone()
    }

    /// All simulated users available for switching.
    #[must_use]
    pub fn available_users(&self) -> &[SimulatedUser] {
        self.catalog.all()
    }

    /// Switch to the catalog user with the given id.
    pub async fn switch_user(&self, id: &str) -> Result<SimulatedUser, SessionError> {
        let user = self
            .catalog
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownUser {
                requested: id.to_string(),
            })?;

        *self.lock_current() = Some(user.clone());
        debug!(user = %user.display_name, role = %user.role, "switched simulated user");

        self.listeners.notify(&Some(user.clone()));
        self.persist_user(&user).await;
        Ok(user)
    }

    /// Switch to the catalog user with the given username.
    pub async fn switch_user_by_username(
        &self,
        username: &str,
    ) -> Result<SimulatedUser, SessionError> {
        let id = self
            .catalog
            .find_by_username(username)
            .map(|user| user.id.clone())
            .ok_or_else(|| SessionError::UnknownUser {
                requested: username.to_string(),
            })?;
        self.switch_user(&id).await
    }

    /// Whether the current user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.lock_current().as_ref().is_some_and(|u| u.role == role)
    }

    /// Whether the current user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Whether the current user is an analyst.
    #[must_use]
    pub fn is_analyst(&self) -> bool {
        self.has_role(Role::Analyst)
    }

    /// Whether the current user is an auditor.
    #[must_use]
    pub fn is_auditor(&self) -> bool {
        self.has_role(Role::Auditor)
    }

    /// Whether the current user may use AI features.
    ///
    /// Visitors cannot; neither can a logged-out session.
    #[must_use]
    pub fn can_use_ai(&self) -> bool {
        self.lock_current()
            .as_ref()
            .is_some_and(|u| u.role != Role::Visitor)
    }

    /// Clear the current user and remove the persisted value.
    ///
    /// Role state is untouched; role and user are simulated independently.
    pub async fn logout(&self) {
        *self.lock_current() = None;
        debug!("simulated user logged out");

        if let Err(err) = self.store.remove(keys::SIMULATED_USER).await {
            warn!(error = %err, "failed to remove persisted user");
        }
        self.listeners.notify(&None);
    }

    /// Subscribe to user changes with latest-value replay: the callback is
    /// invoked immediately with the current value, then on every change,
    /// in registration order.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Option<SimulatedUser>) + Send + Sync + 'static,
    ) -> SubscriberId {
        let current = self.current_user();
        self.listeners.subscribe_with_replay(callback, &current)
    }

    /// Remove a user-change subscriber.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// One-line identity summary for UI display.
    #[must_use]
    pub fn display_info(&self) -> String {
        match self.lock_current().as_ref() {
            Some(user) => format!("{} ({})", user.display_name, user.role),
            None => "Not logged in".to_string(),
        }
    }

    /// Avatar colors for the current user, gray when logged out.
    #[must_use]
    pub fn avatar_style(&self) -> AvatarStyle {
        let background_color = self
            .lock_current()
            .as_ref()
            .map_or_else(|| AVATAR_FALLBACK_COLOR.to_string(), |u| u.avatar_color.clone());
        AvatarStyle {
            background_color,
            color: "#ffffff".to_string(),
        }
    }

    async fn persist_user(&self, user: &SimulatedUser) {
        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(err) = self.store.set(keys::SIMULATED_USER, &json).await {
                    warn!(error = %err, "failed to persist simulated user");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize simulated user"),
        }
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<SimulatedUser>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
