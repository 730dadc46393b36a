use std::time::Duration;

use thiserror::Error;

/// Errors returned by the campaign API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `"success": false`.
    #[error(
        "campaign API rejected the request: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Api { message: Option<String> },

    /// The request was cancelled because no response arrived in time.
    #[error("request timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    /// A non-2xx response whose body was not a JSON envelope.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// The server-supplied message of a rejected request, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            ClientError::Timeout { .. } => true,
            ClientError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
