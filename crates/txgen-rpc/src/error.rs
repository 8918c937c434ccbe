//! RPC error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("authentication failed for {url}")]
    AuthFailed { url: String },

    #[error("malformed response from {endpoint}: {detail}")]
    BadResponse { endpoint: String, detail: String },
}

impl RpcError {
    /// Whether a retry could plausibly succeed (timeouts, connect failures,
    /// server-side 5xx). Client errors and not-found never retry.
    pub fn is_transient(&self) -> bool {
        match self {
            RpcError::Http { source, .. } => source.is_timeout() || source.is_connect(),
            RpcError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
