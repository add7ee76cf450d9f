use super::provider::ChatProvider;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::CoachConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::{HTTP_CLIENT, endpoint};
use async_trait::async_trait;

const PROVIDER: &str = "openai";

/// OpenAI compatible chat completions (`POST {base_url}/chat/completions`)
pub struct OpenAiChat {
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiChat {
    pub fn new(config: &CoachConfig) -> Self {
        Self {
            url: endpoint(&config.base_url, "chat/completions"),
            api_key: config.api_key.trim().to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::ExternalApi {
            provider: PROVIDER.into(),
            message: message.into(),
            source,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiChat {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        if self.api_key.is_empty() {
            return Err(Self::make_error("API key not configured", None));
        }

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let resp = HTTP_CLIENT
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::make_error(format!("request failed: {}", e), Some(e.into())))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Self::make_error(
                format!("HTTP {}: {}", status.as_u16(), text),
                None,
            ));
        }

        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| Self::make_error(format!("invalid JSON: {}", e), Some(e.into())))?;

        completion
            .first_reply()
            .ok_or_else(|| Self::make_error("no choices in response", None))
    }
}
