//! Chat domain types.
//!
//! Conversations and messages in the domain model, independent of any
//! infrastructure concerns. Persisted camelCase/RFC 3339 so documents
//! written by earlier clients re-hydrate unchanged.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum length of a conversation title derived from its first message.
pub const TITLE_MAX_CHARS: usize = 50;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// Parse a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chat message within a conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Model tag for assistant messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Whether the message is still being streamed in.
    #[serde(default, rename = "isStreaming", skip_serializing_if = "is_false")]
    pub streaming: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl ChatMessage {
    /// Create a user-authored message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, content, None)
    }

    /// Create an assistant reply with an optional model tag.
    #[must_use]
    pub fn assistant(content: impl Into<String>, model: Option<String>) -> Self {
        Self::with_role(MessageRole::Assistant, content, model)
    }

    /// Create a system notice (error surfacing inside the thread).
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, content, None)
    }

    fn with_role(role: MessageRole, content: impl Into<String>, model: Option<String>) -> Self {
        Self {
            id: generate_id(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            model,
            streaming: false,
        }
    }
}

/// An ordered thread of chat messages belonging to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    /// Insertion order is chronological order.
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Id of the owning user.
    pub user_id: String,
}

impl Conversation {
    /// Create an empty conversation owned by the given user.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: "New Conversation".to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            user_id: user_id.into(),
        }
    }

    /// Append a message and bump `updated_at`.
    ///
    /// The first message also derives the conversation title.
    pub fn append(&mut self, message: ChatMessage) {
        if self.messages.is_empty() {
            self.title = derive_title(&message.content);
        }
        self.messages.push(message);
        self.updated_at = Utc::now();
    }
}

/// Derive a conversation title from its first message.
#[must_use]
pub fn derive_title(content: &str) -> String {
    truncate_text(content, TITLE_MAX_CHARS)
}

/// Truncate text to `max_chars`, appending an ellipsis marker iff truncated.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Generate a client-unique id: millisecond timestamp plus a random
/// alphanumeric suffix. Collision odds are negligible for a single-process
/// client; this is not a cryptographic identifier.
#[must_use]
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..ID_ALPHABET.len());
            ID_ALPHABET[idx] as char
        })
        .collect();
    format!("{millis}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_round_trip() {
        for role in [MessageRole::User, MessageRole::Assistant, MessageRole::System] {
            assert_eq!(MessageRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(MessageRole::parse("robot"), None);
    }

    #[test]
    fn test_truncate_text_short_input_unchanged() {
        assert_eq!(truncate_text("hello", 50), "hello");
        let exactly_50 = "x".repeat(50);
        assert_eq!(truncate_text(&exactly_50, 50), exactly_50);
    }

    #[test]
    fn test_truncate_text_appends_marker() {
        let long = "a".repeat(60);
        let truncated = truncate_text(&long, 50);
        assert_eq!(truncated, format!("{}...", "a".repeat(50)));
        assert_eq!(truncated.chars().count(), 53);
    }

    #[test]
    fn test_truncate_text_trims_cut_boundary() {
        let text = format!("{} tail", "b".repeat(49));
        // Cut lands on the space after 49 'b's; the marker follows the trim.
        assert_eq!(truncate_text(&text, 50), format!("{}...", "b".repeat(49)));
    }

    #[test]
    fn test_first_append_derives_title() {
        let mut conv = Conversation::new("analyst-001");
        assert_eq!(conv.title, "New Conversation");

        conv.append(ChatMessage::user("What changed in Title 40 this year?"));
        assert_eq!(conv.title, "What changed in Title 40 this year?");

        conv.append(ChatMessage::user("And last year?"));
        assert_eq!(conv.title, "What changed in Title 40 this year?");
        assert_eq!(conv.messages.len(), 2);
    }

    #[test]
    fn test_append_bumps_updated_at() {
        let mut conv = Conversation::new("analyst-001");
        let before = conv.updated_at;
        conv.append(ChatMessage::user("hi"));
        assert!(conv.updated_at >= before);
    }

    #[test]
    fn test_generated_ids_are_unique_in_a_batch() {
        let ids: std::collections::HashSet<String> = (0..256).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn test_conversation_round_trips_camel_case() {
        let mut conv = Conversation::new("auditor-001");
        conv.append(ChatMessage::user("export question"));
        conv.append(ChatMessage::assistant("placeholder", Some("GEMMA3_27B (simulated)".into())));

        let json = serde_json::to_string(&conv).unwrap();
        assert!(json.contains("\"userId\":\"auditor-001\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("isStreaming"));

        let back: Conversation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conv);
    }

    #[test]
    fn test_legacy_document_re_hydrates() {
        // Shape written by earlier clients: ISO timestamps, isStreaming flag.
        let json = r#"{
            "id": "1700000000000-abc123def",
            "title": "old thread",
            "messages": [{
                "id": "1700000000001-xyz987abc",
                "role": "user",
                "content": "hello",
                "timestamp": "2023-11-14T22:13:20.000Z",
                "isStreaming": false
            }],
            "createdAt": "2023-11-14T22:13:20.000Z",
            "updatedAt": "2023-11-14T22:13:21.500Z",
            "userId": "analyst-001"
        }"#;

        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.title, "old thread");
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.updated_at.timestamp_millis(), 1_700_000_001_500);
    }
}
