mod openai;
mod provider;
mod types;

pub use openai::OpenAiChat;
pub use provider::ChatProvider;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole};
