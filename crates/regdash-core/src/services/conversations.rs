//! Per-user conversation store.
//!
//! Holds the signed-in user's conversation list (most-recent-first), the
//! active conversation, and the in-flight send flag. The whole list
//! persists as one JSON document per user; every mutation re-persists.
//!
//! Assistant replies are keyed to the conversation and user captured at
//! send time. A reply whose conversation was deleted, or whose user is no
//! longer signed in, is discarded instead of landing on whatever happens
//! to be active when the responder finishes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::chat::{ChatMessage, Conversation, truncate_text};
use crate::ports::assistant::AssistantPort;
use crate::ports::key_value::{KeyValueStore, keys};

use super::user_session::UserSession;

const ASSISTANT_ERROR_REPLY: &str =
    "Sorry, there was an error processing your message. Please try again.";

const PREVIEW_MAX_CHARS: usize = 60;

/// Errors surfaced by conversation operations.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("No user is signed in")]
    NoUser,

    #[error("You do not have permission to use AI features. Please contact an administrator.")]
    AiAccessDenied,

    #[error("Conversation not found: {0}")]
    UnknownConversation(String),
}

/// A completed send: the user message and the reply that landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub user_message: ChatMessage,
    pub reply: ChatMessage,
}

#[derive(Default)]
struct State {
    /// Id of the user whose list is loaded.
    user_id: Option<String>,
    /// Most-recent-first.
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    in_flight: bool,
}

impl State {
    fn find_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    fn contains(&self, id: &str) -> bool {
        self.conversations.iter().any(|c| c.id == id)
    }
}

/// Store for the current user's chat conversations.
pub struct ConversationStore {
    store: Arc<dyn KeyValueStore>,
    users: Arc<UserSession>,
    assistant: Arc<dyn AssistantPort>,
    inner: Mutex<State>,
}

impl ConversationStore {
    /// Create a store bound to the given user session.
    ///
    /// The list loads lazily on the first operation and reloads whenever
    /// the signed-in user changes.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        users: Arc<UserSession>,
        assistant: Arc<dyn AssistantPort>,
    ) -> Self {
        Self {
            store,
            users,
            assistant,
            inner: Mutex::new(State::default()),
        }
    }

    /// Reconcile against the session's current user, reloading the list
    /// when the user changed since the last operation.
    pub async fn refresh(&self) {
        self.sync_current_user().await;
    }

    /// Create a new empty conversation, prepend it, and make it active.
    pub async fn new_conversation(&self) -> Result<Conversation, ConversationError> {
        let user = self
            .sync_current_user()
            .await
            .ok_or(ConversationError::NoUser)?;

        let conversation = Conversation::new(user.id);
        {
            let mut state = self.lock();
            state.conversations.insert(0, conversation.clone());
            state.active_id = Some(conversation.id.clone());
        }
        self.persist().await;
        Ok(conversation)
    }

    /// Send a user message and wait for the assistant's reply.
    ///
    /// Returns `Ok(None)` without mutating anything when the trimmed text
    /// is empty, a send is already in flight, or no user is signed in.
    /// Fails with [`ConversationError::AiAccessDenied`] before any mutation
    /// when the current user lacks AI access.
    ///
    /// With no active conversation one is created first. The reply is
    /// appended to the originating conversation; if that conversation was
    /// deleted or the user switched while the responder ran, the reply is
    /// discarded and `Ok(None)` is returned (the user message itself was
    /// already persisted).
    pub async fn send_message(
        &self,
        text: &str,
    ) -> Result<Option<ChatExchange>, ConversationError> {
        let Some(user) = self.sync_current_user().await else {
            return Ok(None);
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if !self.users.can_use_ai() {
            return Err(ConversationError::AiAccessDenied);
        }

        let user_message = ChatMessage::user(trimmed);
        let conversation_id = {
            let mut state = self.lock();
            if state.in_flight {
                return Ok(None);
            }

            let conversation_id = match state.active_id.clone().filter(|id| state.contains(id)) {
                Some(id) => id,
                None => {
                    let conversation = Conversation::new(user.id.clone());
                    let id = conversation.id.clone();
                    state.conversations.insert(0, conversation);
                    state.active_id = Some(id.clone());
                    id
                }
            };

            if let Some(conversation) = state.find_mut(&conversation_id) {
                conversation.append(user_message.clone());
            }
            state.in_flight = true;
            conversation_id
        };
        self.persist().await;

        let reply = match self.assistant.respond(trimmed).await {
            Ok(reply) => ChatMessage::assistant(reply.content, reply.model),
            Err(err) => {
                warn!(error = %err, "assistant request failed");
                ChatMessage::system(ASSISTANT_ERROR_REPLY)
            }
        };

        let delivered = self.complete_exchange(&user.id, &conversation_id, reply.clone());
        if delivered {
            self.persist().await;
            Ok(Some(ChatExchange {
                user_message,
                reply,
            }))
        } else {
            Ok(None)
        }
    }

    /// Append a finished reply to its originating conversation, unless the
    /// conversation or user is gone. Clears the in-flight flag on every
    /// path.
    fn complete_exchange(&self, user_id: &str, conversation_id: &str, reply: ChatMessage) -> bool {
        let current_user = self.users.current_user();
        let mut state = self.lock();
        state.in_flight = false;

        let same_user = current_user.as_ref().is_some_and(|u| u.id == user_id);
        if !same_user {
            debug!(conversation = %conversation_id, "discarding reply: user changed mid-flight");
            return false;
        }
        match state.find_mut(conversation_id) {
            Some(conversation) => {
                conversation.append(reply);
                true
            }
            None => {
                debug!(conversation = %conversation_id, "discarding reply: conversation deleted");
                false
            }
        }
    }

    /// Make the given conversation active.
    pub async fn select_conversation(&self, id: &str) -> Result<(), ConversationError> {
        self.sync_current_user().await;
        let mut state = self.lock();
        if !state.contains(id) {
            return Err(ConversationError::UnknownConversation(id.to_string()));
        }
        state.active_id = Some(id.to_string());
        Ok(())
    }

    /// Remove a conversation from the list.
    ///
    /// Interactive confirmation is the view layer's responsibility. When
    /// the deleted conversation was active, the new list head (or nothing)
    /// becomes active.
    pub async fn delete_conversation(&self, id: &str) -> Result<(), ConversationError> {
        self.sync_current_user().await;
        {
            let mut state = self.lock();
            if !state.contains(id) {
                return Err(ConversationError::UnknownConversation(id.to_string()));
            }
            state.conversations.retain(|c| c.id != id);
            if state.active_id.as_deref() == Some(id) {
                state.active_id = state.conversations.first().map(|c| c.id.clone());
            }
        }
        self.persist().await;
        Ok(())
    }

    /// The current user's conversations, most-recent-first.
    pub async fn conversations(&self) -> Vec<Conversation> {
        self.sync_current_user().await;
        self.lock().conversations.clone()
    }

    /// The active conversation, if any.
    pub async fn active_conversation(&self) -> Option<Conversation> {
        self.sync_current_user().await;
        let state = self.lock();
        let id = state.active_id.as_deref()?;
        state.conversations.iter().find(|c| c.id == id).cloned()
    }

    /// Whether a send is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight
    }

    /// Sidebar preview text for a conversation.
    #[must_use]
    pub fn preview(conversation: &Conversation) -> String {
        conversation.messages.last().map_or_else(
            || "No messages yet".to_string(),
            |last| truncate_text(&last.content, PREVIEW_MAX_CHARS),
        )
    }

    async fn sync_current_user(&self) -> Option<crate::domain::user::SimulatedUser> {
        let user = self.users.current_user();
        let loaded_id = self.lock().user_id.clone();

        if loaded_id != user.as_ref().map(|u| u.id.clone()) {
            match &user {
                Some(u) => {
                    let conversations = self.load_for_user(&u.id).await;
                    let mut state = self.lock();
                    state.user_id = Some(u.id.clone());
                    // Active resets to the new user's most recent thread.
                    state.active_id = conversations.first().map(|c| c.id.clone());
                    state.conversations = conversations;
                }
                None => {
                    let mut state = self.lock();
                    state.user_id = None;
                    state.conversations.clear();
                    state.active_id = None;
                }
            }
        }
        user
    }

    async fn load_for_user(&self, user_id: &str) -> Vec<Conversation> {
        let key = keys::conversations(user_id);
        match self.store.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Conversation>>(&raw) {
                Ok(conversations) => conversations,
                Err(err) => {
                    warn!(
                        error = %err,
                        user_id,
                        "failed to parse persisted conversations, starting empty"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, user_id, "failed to read persisted conversations");
                Vec::new()
            }
        }
    }

    async fn persist(&self) {
        let (user_id, serialized) = {
            let state = self.lock();
            let Some(user_id) = state.user_id.clone() else {
                return;
            };
            (user_id, serde_json::to_string(&state.conversations))
        };

        match serialized {
            Ok(json) => {
                let key = keys::conversations(&user_id);
                if let Err(err) = self.store.set(&key, &json).await {
                    warn!(error = %err, user_id, "failed to persist conversations");
                }
            }
            Err(err) => warn!(error = %err, user_id, "failed to serialize conversations"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::MessageRole;
    use crate::ports::assistant::{AssistantError, AssistantReply};
    use crate::ports::key_value::StoreError;
    use crate::services::assistant::SimulatedAssistant;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MapStore {
        fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl KeyValueStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    struct FailingAssistant;

    #[async_trait]
    impl AssistantPort for FailingAssistant {
        async fn respond(&self, _prompt: &str) -> Result<AssistantReply, AssistantError> {
            Err(AssistantError::Backend("model exploded".to_string()))
        }
    }

    async fn store_with_assistant(
        assistant: Arc<dyn AssistantPort>,
    ) -> (ConversationStore, Arc<UserSession>, Arc<MapStore>) {
        let kv = Arc::new(MapStore::new());
        let users = Arc::new(UserSession::load(kv.clone()).await);
        let store = ConversationStore::new(kv.clone(), users.clone(), assistant);
        (store, users, kv)
    }

    async fn default_store() -> (ConversationStore, Arc<UserSession>, Arc<MapStore>) {
        store_with_assistant(Arc::new(SimulatedAssistant::immediate())).await
    }

    #[tokio::test]
    async fn test_new_conversation_prepends_and_activates() {
        let (store, _, _) = default_store().await;

        let first = store.new_conversation().await.unwrap();
        let second = store.new_conversation().await.unwrap();

        let list = store.conversations().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);
        assert_eq!(store.active_conversation().await.unwrap().id, second.id);
        assert_eq!(list[0].user_id, "analyst-001");
    }

    #[tokio::test]
    async fn test_new_conversation_requires_user() {
        let (store, users, _) = default_store().await;
        users.logout().await;

        assert!(matches!(
            store.new_conversation().await,
            Err(ConversationError::NoUser)
        ));
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_sends_are_no_ops() {
        let (store, _, _) = default_store().await;

        assert!(store.send_message("").await.unwrap().is_none());
        assert!(store.send_message("   \n\t").await.unwrap().is_none());
        assert!(store.conversations().await.is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_visitor_send_is_denied_without_mutation() {
        let (store, users, _) = default_store().await;
        users.switch_user_by_username("visitor").await.unwrap();

        let err = store.send_message("let me in").await.unwrap_err();
        assert!(matches!(err, ConversationError::AiAccessDenied));
        assert!(store.conversations().await.is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_send_creates_conversation_and_titles_it() {
        let (store, _, _) = default_store().await;

        let exchange = store
            .send_message("Summarize Title 40 conflicts")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(exchange.user_message.role, MessageRole::User);
        assert_eq!(exchange.reply.role, MessageRole::Assistant);

        let active = store.active_conversation().await.unwrap();
        assert_eq!(active.title, "Summarize Title 40 conflicts");
        assert_eq!(active.messages.len(), 2);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_first_message_title_truncates_at_fifty() {
        let (store, _, _) = default_store().await;

        let long = "x".repeat(80);
        store.send_message(&long).await.unwrap();

        let active = store.active_conversation().await.unwrap();
        assert_eq!(active.title, format!("{}...", "x".repeat(50)));

        // A second message leaves the title alone.
        store.send_message("follow-up").await.unwrap();
        let active = store.active_conversation().await.unwrap();
        assert_eq!(active.title, format!("{}...", "x".repeat(50)));
    }

    #[tokio::test]
    async fn test_assistant_failure_appends_system_message() {
        let (store, _, _) = store_with_assistant(Arc::new(FailingAssistant)).await;

        let exchange = store.send_message("hello?").await.unwrap().unwrap();
        assert_eq!(exchange.reply.role, MessageRole::System);
        assert_eq!(exchange.reply.content, ASSISTANT_ERROR_REPLY);

        let active = store.active_conversation().await.unwrap();
        assert_eq!(active.messages.len(), 2);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_select_and_delete_conversations() {
        let (store, _, _) = default_store().await;

        let first = store.new_conversation().await.unwrap();
        let second = store.new_conversation().await.unwrap();

        store.select_conversation(&first.id).await.unwrap();
        assert_eq!(store.active_conversation().await.unwrap().id, first.id);

        assert!(matches!(
            store.select_conversation("missing-id").await,
            Err(ConversationError::UnknownConversation(_))
        ));

        // Deleting the active conversation re-activates the list head.
        store.delete_conversation(&first.id).await.unwrap();
        assert_eq!(store.active_conversation().await.unwrap().id, second.id);

        store.delete_conversation(&second.id).await.unwrap();
        assert!(store.active_conversation().await.is_none());
        assert!(store.conversations().await.is_empty());
    }

    #[tokio::test]
    async fn test_switching_users_partitions_lists() {
        let (store, users, _) = default_store().await;

        store.send_message("analyst question").await.unwrap();
        assert_eq!(store.conversations().await.len(), 1);

        users.switch_user_by_username("admin").await.unwrap();
        assert!(store.conversations().await.is_empty());
        assert!(store.active_conversation().await.is_none());

        store.send_message("admin question").await.unwrap();
        assert_eq!(store.conversations().await.len(), 1);

        // Back to the analyst: their thread is still there and active.
        users.switch_user_by_username("analyst1").await.unwrap();
        let list = store.conversations().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "analyst question");
        assert_eq!(store.active_conversation().await.unwrap().id, list[0].id);
    }

    #[tokio::test]
    async fn test_round_trip_through_persistence() {
        let kv = Arc::new(MapStore::new());
        let users = Arc::new(UserSession::load(kv.clone()).await);
        let store = ConversationStore::new(
            kv.clone(),
            users.clone(),
            Arc::new(SimulatedAssistant::immediate()),
        );

        store.send_message("first thread").await.unwrap();
        store.new_conversation().await.unwrap();
        store.send_message("second thread").await.unwrap();
        let before = store.conversations().await;

        // A fresh store over the same backing data sees identical state.
        let reloaded = ConversationStore::new(
            kv,
            users,
            Arc::new(SimulatedAssistant::immediate()),
        );
        let after = reloaded.conversations().await;

        assert_eq!(before, after);
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].title, "second thread");
    }

    #[tokio::test]
    async fn test_corrupt_persisted_list_starts_empty() {
        let kv = Arc::new(MapStore::new());
        kv.set(&keys::conversations("analyst-001"), "][ not json")
            .await
            .unwrap();

        let users = Arc::new(UserSession::load(kv.clone()).await);
        let store =
            ConversationStore::new(kv, users, Arc::new(SimulatedAssistant::immediate()));

        assert!(store.conversations().await.is_empty());
        // Still usable afterwards.
        store.send_message("fresh start").await.unwrap();
        assert_eq!(store.conversations().await.len(), 1);
    }

    #[tokio::test]
    async fn test_preview_truncates_last_message() {
        let mut conv = Conversation::new("analyst-001");
        assert_eq!(ConversationStore::preview(&conv), "No messages yet");

        conv.append(ChatMessage::user("short"));
        assert_eq!(ConversationStore::preview(&conv), "short");

        conv.append(ChatMessage::assistant("y".repeat(70), None));
        assert_eq!(
            ConversationStore::preview(&conv),
            format!("{}...", "y".repeat(60))
        );
    }
}
