//! Error taxonomy and response classification for the fetch coordinator.

use thiserror::Error;

/// Terminal outcome of a single fetch that did not succeed.
///
/// Superseded requests are not represented here: they never complete.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connectivity failure, refused connection, broken body stream.
    #[error("Network error for '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the configured total timeout.
    #[error("Request to '{url}' timed out after {after_ms}ms")]
    Timeout { url: String, after_ms: u64 },

    /// Server answered with a status outside 200..=299.
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Server answered 2xx with a zero-length body.
    #[error("Received empty response body")]
    EmptyBody,

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Short machine-readable tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::Timeout { .. } => "timeout",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::EmptyBody => "empty_body",
            FetchError::Client(_) => "client",
        }
    }

    /// Status code carried by an HTTP status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Raw response as handed over by a transport, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Classify a raw response into the success bytes or a typed error.
///
/// The status check runs first, so a 404 with an empty body is still
/// reported as `HttpStatus`.
pub fn classify(response: RawResponse) -> Result<Vec<u8>, FetchError> {
    if !(200..=299).contains(&response.status) {
        return Err(FetchError::HttpStatus {
            status: response.status,
            message: format!(
                "Received invalid HTTP response with status code {}",
                response.status
            ),
        });
    }

    if response.body.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    Ok(response.body)
}
