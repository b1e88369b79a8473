use tracing::warn;

use crate::error::AdviceError;
use crate::pipeline::{AdvicePipeline, GenerativeModel};
use crate::prompts::CHAT_SYSTEM_INSTRUCTION;
use crate::types::{ChatRole, ChatTurn, GenerationRequest, ResponseFormat};

pub const CONNECTION_APOLOGY: &str = "Oops! I am having trouble connecting right now.";
pub const EMPTY_REPLY: &str = "Sorry, I encountered an error.";

/// Text conversation with the assistant. The whole history goes out with
/// every message.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    history: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Appends the user turn and the assistant's reply. Only blank input
    /// is an error; service failures become an apology turn.
    pub async fn send<M: GenerativeModel>(
        &mut self,
        pipeline: &AdvicePipeline<M>,
        message: &str,
    ) -> Result<&ChatTurn, AdviceError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AdviceError::EmptyMessage);
        }
        self.history.push(ChatTurn {
            role: ChatRole::User,
            text: message.to_string(),
        });

        let request = GenerationRequest {
            model: pipeline.config().model.clone(),
            system_instruction: Some(CHAT_SYSTEM_INSTRUCTION.to_string()),
            turns: self.history.clone(),
            attachment: None,
            response_format: ResponseFormat::Text,
        };
        let text = match pipeline.call(request).await {
            Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "chat reply failed");
                CONNECTION_APOLOGY.to_string()
            }
        };
        self.history.push(ChatTurn {
            role: ChatRole::Model,
            text,
        });
        Ok(&self.history[self.history.len() - 1])
    }
}
