//! Unified error types for TanOS
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and storage errors
//! - `LlmError`: LLM provider client errors
//! - `ParseError`: Parsing of user-supplied identifiers and versions
//! - `AppError`: Application layer errors (mapped to CLI exit codes)

use thiserror::Error;

/// Domain layer errors - business logic and persistence
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for DomainError {
    fn from(e: serde_yaml::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}

/// LLM provider client errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - check the API key for {0}")]
    Unauthorized(String),

    #[error("Rate limited by {0}")]
    RateLimited(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("Unsupported LLM provider: {0}")]
    UnsupportedProvider(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Empty response from {0}")]
    EmptyResponse(String),
}

/// Parse errors for user-supplied identifiers
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid section path: {0}")]
    InvalidSectionPath(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),
}

/// Application layer errors - surfaced by CLI handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ParseError> for AppError {
    fn from(e: ParseError) -> Self {
        AppError::Parse(e.to_string())
    }
}

impl AppError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::BadRequest(_)
            | AppError::Parse(_)
            | AppError::Domain(DomainError::Validation(_)) => 2,
            AppError::NotFound(_) | AppError::Domain(DomainError::NotFound(_)) => 3,
            AppError::Llm(_) => 4,
            AppError::Domain(_) | AppError::Internal(_) => 1,
        }
    }
}
