//! Simulated assistant responder.
//!
//! Placeholder implementation of [`AssistantPort`] used until a real model
//! backend is wired in. Replies after a short random delay with one of a
//! fixed set of canned answers.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::ports::assistant::{AssistantError, AssistantPort, AssistantReply};

/// Model tag attached to simulated replies.
pub const SIMULATED_MODEL: &str = "GEMMA3_27B (simulated)";

const CANNED_REPLIES: [&str; 3] = [
    "This is a placeholder response. Once the backend is connected, I'll provide intelligent \
     answers about federal regulations.",
    "Hello! I'm ready to help with regulatory analysis once the AI backend service is implemented.",
    "Your question has been received. The AI model integration (Ollama/GPT) will provide actual \
     answers soon.",
];

/// Canned-reply assistant with a configurable simulated latency.
#[derive(Debug, Clone)]
pub struct SimulatedAssistant {
    min_delay: Duration,
    max_delay: Duration,
}

impl SimulatedAssistant {
    /// Responder with the production delay window of 1-2 seconds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(2000),
        }
    }

    /// Responder with a custom delay window.
    #[must_use]
    pub const fn with_delay(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay,
        }
    }

    /// Responder that replies without sleeping, for tests.
    #[must_use]
    pub const fn immediate() -> Self {
        Self::with_delay(Duration::ZERO, Duration::ZERO)
    }

    fn pick_delay(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        let min = u64::try_from(self.min_delay.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rand::rng().random_range(min..=max))
    }

    fn pick_reply(prompt: &str) -> String {
        // Slot 0 echoes the prompt; the rest are fixed.
        let pick = rand::rng().random_range(0..=CANNED_REPLIES.len());
        if pick == 0 {
            format!(
                "I'm a simulated AI assistant. The backend integration is pending. \
                 Your message was: {prompt}"
            )
        } else {
            CANNED_REPLIES[pick - 1].to_string()
        }
    }
}

impl Default for SimulatedAssistant {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssistantPort for SimulatedAssistant {
    async fn respond(&self, prompt: &str) -> Result<AssistantReply, AssistantError> {
        let delay = self.pick_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        Ok(AssistantReply {
            content: Self::pick_reply(prompt),
            model: Some(SIMULATED_MODEL.to_string()),
        })
    }
}
