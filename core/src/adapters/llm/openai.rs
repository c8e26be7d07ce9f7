//! OpenAI chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{build_client, context_block, handle_response, non_empty};
use crate::domain::ports::{LlmClient, LlmRequest};
use crate::error::LlmError;

pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
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

    fn build_body<'a>(&'a self, request: &'a LlmRequest) -> ChatRequest<'a> {
        let mut messages = vec![ChatMessage {
            role: "system",
            content: request.system_prompt.clone(),
        }];
        if let Some(ctx) = context_block(request.context.as_deref()) {
            messages.push(ChatMessage {
                role: "system",
                content: ctx,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: request.user_prompt.clone(),
        });

        ChatRequest {
            model: &self.model,
            messages,
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            temperature: request.temperature.unwrap_or(self.temperature),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn provider(&self) -> &str {
        "openai"
    }

    async fn send_prompt(&self, request: &LlmRequest) -> Result<String, LlmError> {
        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.build_body(request))
            .send()
            .await?;

        let body: ChatResponse = handle_response(self.provider(), response).await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);
        non_empty(self.provider(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiClient {
        OpenAiClient::new(
            "https://api.openai.com/".to_string(),
            "sk-test".to_string(),
            "gpt-4o".to_string(),
            2000,
            0.7,
            30,
        )
        .unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(client().base_url, "https://api.openai.com");
    }

    #[test]
    fn context_becomes_second_system_message() {
        let client = client();
        let request = LlmRequest::new("You are Nomad", "Plan my week").with_context("state");
        let body = serde_json::to_value(client.build_body(&request)).unwrap();

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(
            messages[1]["content"],
            "Relevant Context for this interaction:\nstate"
        );
        assert_eq!(messages[2]["role"], "user");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["model"], "gpt-4o");
    }

    #[test]
    fn request_overrides_defaults() {
        let client = client();
        let mut request = LlmRequest::new("sys", "user").with_temperature(0.25);
        request.max_tokens = Some(64);
        let body = serde_json::to_value(client.build_body(&request)).unwrap();

        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["temperature"], 0.25);
    }

    #[test]
    fn parses_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"  Ahoy  "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let text = parsed.choices.into_iter().next().and_then(|c| c.message.content);
        assert_eq!(non_empty("openai", text).unwrap(), "Ahoy");
    }
}
