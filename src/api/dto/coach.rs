//! Coach conversation DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::external::{ChatMessage, ChatRole};
use crate::services::CoachReply;

pub const MAX_MESSAGE_CHARS: u64 = 4000;
pub const MAX_HISTORY_TURNS: u64 = 20;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("message required".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "message": "How much should I keep in an emergency fund?",
    "history": [{"role": "assistant", "content": "Hi! What are you saving for?"}],
    "context": {"monthlyIncome": 4200}
}))]
pub struct CoachRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 4000, message = "message must be at most 4000 characters")
    )]
    pub message: String,
    #[serde(default)]
    #[validate(
        length(max = 20, message = "history must have at most 20 entries"),
        nested
    )]
    pub history: Vec<CoachTurn>,
    /// Free-form JSON describing the user's situation
    #[schema(value_type = Option<Object>)]
    pub context: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CoachTurn {
    pub role: TurnRole,
    #[validate(length(max = 4000, message = "history content must be at most 4000 characters"))]
    pub content: String,
}

/// Roles a caller may replay. System turns are always ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl From<&CoachTurn> for ChatMessage {
    fn from(turn: &CoachTurn) -> Self {
        let role = match turn.role {
            TurnRole::User => ChatRole::User,
            TurnRole::Assistant => ChatRole::Assistant,
        };
        ChatMessage::new(role, turn.content.clone())
    }
}

impl CoachRequest {
    pub fn history_messages(&self) -> Vec<ChatMessage> {
        self.history.iter().map(ChatMessage::from).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"reply": "Aim for three to six months of expenses.", "model": "gpt-4o-mini"}))]
pub struct CoachResponse {
    pub reply: String,
    pub model: String,
}

impl From<CoachReply> for CoachResponse {
    fn from(reply: CoachReply) -> Self {
        Self {
            reply: reply.reply,
            model: reply.model,
        }
    }
}
