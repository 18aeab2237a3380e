use reqwest::StatusCode;
use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Reasons a single NWS request produced no data.
///
/// These never leave the fetch helper; they are logged and collapsed into an
/// absent value.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request failed with status: {0}")]
    Status(StatusCode),

    #[error("invalid JSON body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("request abandoned during shutdown")]
    Cancelled,
}

/// Failures that abort a tool invocation instead of producing text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The upstream answered with valid JSON that lacks a required key.
    #[error("malformed {what} response: {source}")]
    MalformedResponse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::internal_error(err.to_string(), None)
    }
}
