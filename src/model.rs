// Core structs: ModelGroup, SearchResult, error types
use serde::Serialize;
use thiserror::Error;

/// Model names sharing one compatibility grouping, in document order.
pub type ModelGroup = Vec<String>;

/// Groups extracted from the selected panel, in document order.
pub type ExtractionResult = Vec<ModelGroup>;

/// Outcome of matching a query against extracted groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matches: Vec<String>,
    pub groups: Vec<ModelGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub success: bool,
    pub matches: Vec<String>,
    pub groups: Vec<ModelGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    pub fn found(outcome: MatchOutcome, raw_html: String) -> Self {
        Self {
            success: true,
            matches: outcome.matches,
            groups: outcome.groups,
            raw_html: Some(raw_html),
            error: None,
        }
    }

    /// A failed search never carries matches or groups.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            matches: Vec::new(),
            groups: Vec::new(),
            raw_html: None,
            error: Some(error.into()),
        }
    }
}

/// Response of the raw `fetch` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResult {
    pub fn fetched(html: String) -> Self {
        Self { success: true, html: Some(html), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, html: None, error: Some(error.into()) }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },
    #[error("Failed to fetch page from {url}")]
    InvalidResponse { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Invalid selector: {0}")]
    Selector(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid API action")]
    UnknownAction,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid PORT value: {0}")]
    Port(String),
}
