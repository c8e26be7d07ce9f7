//! Offline provider that echoes the request back

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{LlmClient, LlmRequest};
use crate::error::LlmError;

pub struct MockLlmClient {
    delay: Duration,
}

impl MockLlmClient {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

fn mock_response(request: &LlmRequest) -> String {
    let system_snippet: String = request
        .system_prompt
        .chars()
        .take(30)
        .collect::<String>()
        .trim()
        .replace('\n', "");

    let context_snippet = match request.context.as_deref() {
        Some(ctx) if !ctx.is_empty() => ctx.chars().take(150).collect::<String>(),
        _ => "[No specific context provided]".to_string(),
    };

    format!(
        "This is a MOCKED LLM response to your query: '{}'.\n\
         Nomad would now provide a thoughtful, persona-consistent, and context-aware answer \
         based on the '{}...' module prompt, drawing from MEMORIES and Captain's Log state like:\n\
         {}...\nIt would then suggest next steps or ask clarifying questions if needed.",
        request.user_prompt, system_snippet, context_snippet
    )
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    async fn send_prompt(&self, request: &LlmRequest) -> Result<String, LlmError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let response = mock_response(request);
        tracing::debug!(
            chars = response.len(),
            "mock LLM response generated"
        );
        Ok(response)
    }
}
