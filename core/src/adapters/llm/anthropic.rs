//! Anthropic messages API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{build_client, context_block, handle_response, non_empty};
use crate::domain::ports::{LlmClient, LlmRequest};
use crate::error::LlmError;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            http: build_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }

    fn build_body<'a>(&'a self, request: &'a LlmRequest) -> MessagesRequest<'a> {
        let system = match context_block(request.context.as_deref()) {
            Some(ctx) => format!("{}\n\n{}", request.system_prompt, ctx),
            None => request.system_prompt.clone(),
        };

        MessagesRequest {
            model: &self.model,
            system,
            messages: vec![Message {
                role: "user",
                content: &request.user_prompt,
            }],
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            temperature: request.temperature.unwrap_or(self.temperature),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: String,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

fn first_text(response: MessagesResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .find(|b| b.kind == "text")
        .and_then(|b| b.text)
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn provider(&self) -> &str {
        "anthropic"
    }

    async fn send_prompt(&self, request: &LlmRequest) -> Result<String, LlmError> {
        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.build_body(request))
            .send()
            .await?;

        let body: MessagesResponse = handle_response(self.provider(), response).await?;
        non_empty(self.provider(), first_text(body))
    }
}
