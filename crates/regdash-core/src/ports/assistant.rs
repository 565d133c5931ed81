//! Assistant responder port.
//!
//! Abstracts the AI reply step so the conversation store does not care
//! whether replies come from a real model backend or the bundled
//! placeholder responder.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur producing an assistant reply.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant backend error: {0}")]
    Backend(String),
}

/// A completed assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub content: String,
    /// Tag of the model that produced the reply, when known.
    pub model: Option<String>,
}

/// Port for producing assistant replies to user prompts.
#[async_trait]
pub trait AssistantPort: Send + Sync {
    /// Produce a reply to `prompt`. May suspend for however long the
    /// responder takes; the caller owns in-flight bookkeeping.
    async fn respond(&self, prompt: &str) -> Result<AssistantReply, AssistantError>;
}
