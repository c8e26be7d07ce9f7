//! Ollama generate API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{build_client, handle_response, non_empty};
use crate::domain::ports::{LlmClient, LlmRequest};
use crate::error::LlmError;

pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OllamaClient {
    pub fn new(
        base_url: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            http: build_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            max_tokens,
            temperature,
        })
    }

    fn build_body<'a>(&'a self, request: &LlmRequest) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt: compose_prompt(request),
            stream: false,
            options: GenerateOptions {
                num_predict: request.max_tokens.unwrap_or(self.max_tokens),
                temperature: request.temperature.unwrap_or(self.temperature),
            },
        }
    }
}

/// Ollama takes a single prompt, so system, context and user input are joined
fn compose_prompt(request: &LlmRequest) -> String {
    format!(
        "{}\n\nRelevant Context:\n{}\n\nUser Request:\n{}",
        request.system_prompt,
        request.context.as_deref().unwrap_or(""),
        request.user_prompt
    )
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[async_trait]
impl LlmClient for OllamaClient {
    fn provider(&self) -> &str {
        "ollama"
    }

    async fn send_prompt(&self, request: &LlmRequest) -> Result<String, LlmError> {
        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&self.build_body(request))
            .send()
            .await?;

        let body: GenerateResponse = handle_response(self.provider(), response).await?;
        non_empty(self.provider(), body.response)
    }
}
