//! LLM port
//!
//! A single request/response exchange with a language model. Providers
//! decide how the context block is attached to the conversation.

use async_trait::async_trait;

use crate::error::LlmError;

/// A prompt exchange: module system prompt, user input and optional context
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Captain's Log state plus relevant MEMORIES
    pub context: Option<String>,
    /// Overrides the provider's configured limit
    pub max_tokens: Option<u32>,
    /// Overrides the provider's configured temperature
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            context: None,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name for logs and `show-config`
    fn provider(&self) -> &str;

    /// Send the request and return the model's text response
    async fn send_prompt(&self, request: &LlmRequest) -> Result<String, LlmError>;
}
