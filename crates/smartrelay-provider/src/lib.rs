pub mod openai;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use openai::{OpenAiProvider, ProviderErrorKind};
pub use types::*;

/// OpenRouter API - OpenAI compatible, multi-model router
/// https://openrouter.ai/docs
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse>;
}

/// Echoes the last message back. Used where no upstream should be contacted.
pub struct StubProvider;

#[async_trait]
impl LlmProvider for StubProvider {
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse> {
        let user_text = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(LlmResponse {
            text: format!("[stub:{}] {}", request.model, user_text),
            input_tokens: None,
            output_tokens: None,
            stop_reason: Some("stop".into()),
        })
    }
}
