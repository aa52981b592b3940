use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::fetch::error::{FetchError, RawResponse};

/// Network seam of the fetch coordinator.
///
/// Implementations perform a single GET and hand back the raw status and
/// body. Classification into success or error happens in the coordinator,
/// so a transport only reports failures it saw below the HTTP layer.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: Client,
    connect_timeout: Option<Duration>,
}

impl HttpTransport {
    /// Build a transport with an optional connect timeout.
    ///
    /// The total request timeout is enforced by the coordinator, not here.
    pub fn new(connect_timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(connect_timeout) = connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            connect_timeout,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

impl HttpTransport {
    fn transport_error(&self, url: &str, source: reqwest::Error) -> FetchError {
        // The connect timeout is the only timeout configured on the client.
        if let (true, Some(connect_timeout)) = (source.is_timeout(), self.connect_timeout) {
            return FetchError::Timeout {
                url: url.to_string(),
                after_ms: u64::try_from(connect_timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }
        FetchError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
