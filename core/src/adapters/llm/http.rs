//! Shared HTTP plumbing for the hosted providers

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::LlmError;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, LlmError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Decode a successful response, mapping error statuses per provider
pub(crate) async fn handle_response<T: for<'de> Deserialize<'de>>(
    provider: &str,
    response: reqwest::Response,
) -> Result<T, LlmError> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(e.to_string()))
    } else if status.as_u16() == 401 {
        Err(LlmError::Unauthorized(provider.to_string()))
    } else if status.as_u16() == 429 {
        Err(LlmError::RateLimited(provider.to_string()))
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(LlmError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Context block appended to the system side of a conversation
pub(crate) fn context_block(context: Option<&str>) -> Option<String> {
    context
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("Relevant Context for this interaction:\n{}", c))
}

pub(crate) fn non_empty(provider: &str, text: Option<String>) -> Result<String, LlmError> {
    text.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| LlmError::EmptyResponse(provider.to_string()))
}
