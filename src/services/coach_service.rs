//! Savings coach conversations.

use std::sync::Arc;

use serde_json::Value;

use crate::error::AppResult;
use crate::external::{ChatMessage, ChatProvider, ChatRole};

#[derive(Debug, Clone, PartialEq)]
pub struct CoachReply {
    pub reply: String,
    pub model: String,
}

#[derive(Clone)]
pub struct CoachService {
    provider: Arc<dyn ChatProvider>,
    system_prompt: String,
}

impl CoachService {
    pub fn new(provider: Arc<dyn ChatProvider>, system_prompt: String) -> Self {
        Self {
            provider,
            system_prompt,
        }
    }

    /// System prompt (with `context` appended as JSON), then the prior
    /// turns, then the new user message.
    pub fn build_messages(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: Option<&Value>,
    ) -> Vec<ChatMessage> {
        let system = match context {
            Some(ctx) if !ctx.is_null() => {
                format!("{}\n\nUser context (JSON): {}", self.system_prompt, ctx)
            }
            _ => self.system_prompt.clone(),
        };

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::new(ChatRole::System, system));
        messages.extend(history.iter().cloned());
        messages.push(ChatMessage::new(ChatRole::User, message.trim()));
        messages
    }

    pub async fn ask(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: Option<&Value>,
    ) -> AppResult<CoachReply> {
        let messages = self.build_messages(message, history, context);

        tracing::debug!(
            model = self.provider.model(),
            turns = messages.len(),
            "Requesting coach reply"
        );

        let reply = self.provider.complete(&messages).await?;

        Ok(CoachReply {
            reply,
            model: self.provider.model().to_string(),
        })
    }
}
