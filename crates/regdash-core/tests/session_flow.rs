//! End-to-end session scenarios over real store implementations.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use regdash_core::ports::assistant::{AssistantError, AssistantPort, AssistantReply};
use regdash_core::ports::backend::NoopBackend;
use regdash_core::services::{ConversationStore, RoleSession, SimulatedAssistant, UserSession};
use regdash_core::{KeyValueStore, Role, keys};
use regdash_store::{FileStore, MemoryStore};

/// Assistant that blocks until released, so tests can interleave state
/// changes with an in-flight send.
struct GatedAssistant {
    gate: Notify,
}

impl GatedAssistant {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
        })
    }

    fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl AssistantPort for GatedAssistant {
    async fn respond(&self, _prompt: &str) -> Result<AssistantReply, AssistantError> {
        self.gate.notified().await;
        Ok(AssistantReply {
            content: "gated reply".to_string(),
            model: None,
        })
    }
}

async fn wait_until_loading(store: &ConversationStore) {
    for _ in 0..200 {
        if store.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("send never reached the in-flight state");
}

#[tokio::test]
async fn role_and_user_state_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let file_store = FileStore::new(dir.path());
        file_store.ensure_root().await.unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(file_store);

        let roles = RoleSession::load(store.clone(), Arc::new(NoopBackend::new())).await;
        roles.simulate_role("auditor").await.unwrap();

        let users = Arc::new(UserSession::load(store.clone()).await);
        users.switch_user_by_username("admin").await.unwrap();

        let conversations = ConversationStore::new(
            store,
            users,
            Arc::new(SimulatedAssistant::immediate()),
        );
        conversations.send_message("persist me").await.unwrap();
    }

    // A fresh composition over the same directory restores everything.
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    let roles = RoleSession::load(store.clone(), Arc::new(NoopBackend::new())).await;
    assert_eq!(roles.current_role(), Role::Auditor);

    let users = Arc::new(UserSession::load(store.clone()).await);
    assert_eq!(users.current_user().unwrap().username, "admin");

    let conversations =
        ConversationStore::new(store, users, Arc::new(SimulatedAssistant::immediate()));
    let list = conversations.conversations().await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "persist me");
    assert_eq!(list[0].messages.len(), 2);
}

#[tokio::test]
async fn backend_failures_never_block_role_switching() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let roles = RoleSession::load(store.clone(), Arc::new(NoopBackend::new())).await;

    let notified = Arc::new(AtomicUsize::new(0));
    let notified_clone = Arc::clone(&notified);
    roles.on_role_change(move |_| {
        notified_clone.fetch_add(1, Ordering::SeqCst);
    });

    // NoopBackend fails every sync; the switch still lands and notifies.
    roles.simulate_role("ADMIN").await.unwrap();
    assert_eq!(roles.current_role(), Role::Admin);
    assert_eq!(notified.load(Ordering::SeqCst), 1);
    assert_eq!(
        store.get(keys::SIMULATED_ROLE).await.unwrap().as_deref(),
        Some("ADMIN")
    );
}

#[tokio::test]
async fn role_and_user_simulation_are_independent() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let roles = RoleSession::load(store.clone(), Arc::new(NoopBackend::new())).await;
    let users = Arc::new(UserSession::load(store.clone()).await);

    roles.simulate_role("ANALYST").await.unwrap();
    users.logout().await;

    // Logout cleared the user key but left the role alone.
    assert_eq!(roles.current_role(), Role::Analyst);
    assert_eq!(store.get(keys::SIMULATED_USER).await.unwrap(), None);
    assert!(store.get(keys::SIMULATED_ROLE).await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reply_is_discarded_when_user_switches_mid_flight() {
    let kv = Arc::new(MemoryStore::new());
    let users = Arc::new(UserSession::load(kv.clone()).await);
    let assistant = GatedAssistant::new();
    let store = Arc::new(ConversationStore::new(
        kv.clone(),
        users.clone(),
        assistant.clone(),
    ));

    let sender = Arc::clone(&store);
    let send = tokio::spawn(async move { sender.send_message("are you there?").await });

    wait_until_loading(&store).await;
    users.switch_user_by_username("admin").await.unwrap();
    assistant.release();

    // The reply was dropped, not delivered to the admin's (empty) list.
    assert_eq!(send.await.unwrap().unwrap(), None);
    assert!(store.conversations().await.is_empty());
    assert!(!store.is_loading());

    // The analyst's persisted thread holds only the user message.
    users.switch_user_by_username("analyst1").await.unwrap();
    let list = store.conversations().await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].messages.len(), 1);
    assert_eq!(list[0].messages[0].content, "are you there?");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reply_is_discarded_when_conversation_deleted_mid_flight() {
    let kv = Arc::new(MemoryStore::new());
    let users = Arc::new(UserSession::load(kv.clone()).await);
    let assistant = GatedAssistant::new();
    let store = Arc::new(ConversationStore::new(
        kv.clone(),
        users.clone(),
        assistant.clone(),
    ));

    let sender = Arc::clone(&store);
    let send = tokio::spawn(async move { sender.send_message("doomed thread").await });

    wait_until_loading(&store).await;
    let active = store.active_conversation().await.unwrap();
    store.delete_conversation(&active.id).await.unwrap();
    assistant.release();

    assert_eq!(send.await.unwrap().unwrap(), None);
    assert!(store.conversations().await.is_empty());
    assert!(!store.is_loading());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn second_send_is_a_no_op_while_one_is_in_flight() {
    let kv = Arc::new(MemoryStore::new());
    let users = Arc::new(UserSession::load(kv.clone()).await);
    let assistant = GatedAssistant::new();
    let store = Arc::new(ConversationStore::new(kv, users, assistant.clone()));

    let sender = Arc::clone(&store);
    let send = tokio::spawn(async move { sender.send_message("first").await });

    wait_until_loading(&store).await;
    assert_eq!(store.send_message("second").await.unwrap(), None);
    assistant.release();

    let exchange = send.await.unwrap().unwrap().unwrap();
    assert_eq!(exchange.reply.content, "gated reply");

    let active = store.active_conversation().await.unwrap();
    // Only the first send's messages are present.
    assert_eq!(active.messages.len(), 2);
    assert_eq!(active.title, "first");
}
