//! LLM provider adapters
//!
//! `LlmProvider` picks one concrete client at startup from `LLM_PROVIDER`
//! so services can stay generic over a single `LlmClient` type.

mod anthropic;
mod http;
mod mock;
mod ollama;
mod openai;

pub use anthropic::AnthropicClient;
pub use mock::MockLlmClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::domain::ports::{LlmClient, LlmRequest};
use crate::error::LlmError;

pub enum LlmProvider {
    Mock(MockLlmClient),
    OpenAi(OpenAiClient),
    Anthropic(AnthropicClient),
    Ollama(OllamaClient),
}

impl LlmProvider {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let provider = match config.provider.as_str() {
            "mock" => LlmProvider::Mock(MockLlmClient::new(config.mock_delay_ms)),
            "openai" => {
                let api_key = config
                    .openai_api_key
                    .clone()
                    .ok_or(LlmError::MissingApiKey("OPENAI_API_KEY"))?;
                LlmProvider::OpenAi(OpenAiClient::new(
                    config.openai_base_url.clone(),
                    api_key,
                    config.openai_model.clone(),
                    config.max_tokens,
                    config.temperature,
                    config.timeout_secs,
                )?)
            }
            "anthropic" => {
                let api_key = config
                    .anthropic_api_key
                    .clone()
                    .ok_or(LlmError::MissingApiKey("ANTHROPIC_API_KEY"))?;
                LlmProvider::Anthropic(AnthropicClient::new(
                    config.anthropic_base_url.clone(),
                    api_key,
                    config.anthropic_model.clone(),
                    config.max_tokens,
                    config.temperature,
                    config.timeout_secs,
                )?)
            }
            "ollama" => LlmProvider::Ollama(OllamaClient::new(
                config.ollama_base_url.clone(),
                config.ollama_model.clone(),
                config.max_tokens,
                config.temperature,
                config.timeout_secs,
            )?),
            other => return Err(LlmError::UnsupportedProvider(other.to_string())),
        };

        tracing::debug!(provider = provider.provider(), "LLM provider initialized");
        Ok(provider)
    }

    /// Model name sent to the provider, if any
    pub fn model<'a>(&self, config: &'a LlmConfig) -> Option<&'a str> {
        match self {
            LlmProvider::Mock(_) => None,
            LlmProvider::OpenAi(_) => Some(&config.openai_model),
            LlmProvider::Anthropic(_) => Some(&config.anthropic_model),
            LlmProvider::Ollama(_) => Some(&config.ollama_model),
        }
    }
}

#[async_trait]
impl LlmClient for LlmProvider {
    fn provider(&self) -> &str {
        match self {
            LlmProvider::Mock(c) => c.provider(),
            LlmProvider::OpenAi(c) => c.provider(),
            LlmProvider::Anthropic(c) => c.provider(),
            LlmProvider::Ollama(c) => c.provider(),
        }
    }

    async fn send_prompt(&self, request: &LlmRequest) -> Result<String, LlmError> {
        tracing::debug!(
            provider = self.provider(),
            system_chars = request.system_prompt.len(),
            user_chars = request.user_prompt.len(),
            has_context = request.context.is_some(),
            "sending prompt"
        );
        match self {
            LlmProvider::Mock(c) => c.send_prompt(request).await,
            LlmProvider::OpenAi(c) => c.send_prompt(request).await,
            LlmProvider::Anthropic(c) => c.send_prompt(request).await,
            LlmProvider::Ollama(c) => c.send_prompt(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn llm_config(vars: &[(&str, &str)]) -> LlmConfig {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .llm
    }

    #[test]
    fn defaults_to_mock() {
        let provider = LlmProvider::from_config(&llm_config(&[])).unwrap();
        assert_eq!(provider.provider(), "mock");
    }

    #[test]
    fn hosted_providers_need_keys() {
        let err = LlmProvider::from_config(&llm_config(&[("LLM_PROVIDER", "openai")]))
            .err()
            .unwrap();
        assert!(matches!(err, LlmError::MissingApiKey("OPENAI_API_KEY")));

        let err = LlmProvider::from_config(&llm_config(&[("LLM_PROVIDER", "anthropic")]))
            .err()
            .unwrap();
        assert!(matches!(err, LlmError::MissingApiKey("ANTHROPIC_API_KEY")));
    }

    #[test]
    fn builds_configured_provider() {
        let config = llm_config(&[("LLM_PROVIDER", "OpenAI"), ("OPENAI_API_KEY", "sk-1")]);
        let provider = LlmProvider::from_config(&config).unwrap();
        assert_eq!(provider.provider(), "openai");
        assert_eq!(provider.model(&config), Some("gpt-4o"));

        let ollama = LlmProvider::from_config(&llm_config(&[("LLM_PROVIDER", "ollama")])).unwrap();
        assert_eq!(ollama.provider(), "ollama");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = LlmProvider::from_config(&llm_config(&[("LLM_PROVIDER", "local_gguf")]))
            .err()
            .unwrap();
        assert!(matches!(err, LlmError::UnsupportedProvider(p) if p == "local_gguf"));
    }

    #[tokio::test]
    async fn dispatches_to_mock() {
        let provider =
            LlmProvider::from_config(&llm_config(&[("MOCK_LLM_DELAY_MS", "0")])).unwrap();
        let response = provider
            .send_prompt(&LlmRequest::new("sys", "ping"))
            .await
            .unwrap();
        assert!(response.contains("'ping'"));
    }
}
