use super::types::ChatMessage;
use crate::error::AppResult;
use async_trait::async_trait;

/// A chat-completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Model name reported back to clients
    fn model(&self) -> &str;

    /// Send the whole conversation and return the assistant's reply, trimmed.
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String>;
}
