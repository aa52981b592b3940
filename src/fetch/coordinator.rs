use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::time::timeout;

use crate::config::FetchConfig;
use crate::fetch::error::{classify, FetchError};
use crate::fetch::registry::InFlightRegistry;
use crate::fetch::transport::{HttpTransport, Transport};

/// Tunables applied to every request issued by a coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Total request timeout. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl From<&FetchConfig> for FetchOptions {
    fn from(config: &FetchConfig) -> Self {
        Self {
            timeout: config.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Result of awaiting a [`PendingFetch`].
#[derive(Debug)]
pub enum FetchOutcome {
    /// The request ran to a terminal outcome.
    Completed(Result<Vec<u8>, FetchError>),
    /// The request was superseded by a newer one for the same key, or
    /// cancelled. It never reported.
    Superseded,
}

/// Result channel of a request started with [`FetchCoordinator::request`].
pub struct PendingFetch {
    receiver: oneshot::Receiver<Result<Vec<u8>, FetchError>>,
}

impl PendingFetch {
    pub async fn outcome(self) -> FetchOutcome {
        match self.receiver.await {
            Ok(result) => FetchOutcome::Completed(result),
            Err(_) => FetchOutcome::Superseded,
        }
    }
}

/// Issues GET requests keyed by request identity.
///
/// For any key only the most recently issued request may complete; older
/// ones are aborted and stay silent. Completion callbacks run on a runtime
/// worker, never on the caller's thread.
pub struct FetchCoordinator<T: Transport = HttpTransport> {
    transport: Arc<T>,
    registry: Arc<InFlightRegistry>,
    runtime: Handle,
    options: FetchOptions,
}

impl<T: Transport> Clone for FetchCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            registry: Arc::clone(&self.registry),
            runtime: self.runtime.clone(),
            options: self.options,
        }
    }
}

impl FetchCoordinator<HttpTransport> {
    /// Build a coordinator over the `reqwest` transport from config.
    pub fn from_config(config: &FetchConfig, runtime: Handle) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(config.connect_timeout_ms.map(Duration::from_millis))?;
        Ok(Self::new(
            transport,
            Arc::new(InFlightRegistry::new()),
            runtime,
            FetchOptions::from(config),
        ))
    }
}

impl<T: Transport> FetchCoordinator<T> {
    pub fn new(
        transport: T,
        registry: Arc<InFlightRegistry>,
        runtime: Handle,
        options: FetchOptions,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            registry,
            runtime,
            options,
        }
    }

    /// Start a GET for `url` under `key` and return immediately.
    ///
    /// Any in-flight request registered under `key` is cancelled first.
    /// `on_complete` fires at most once, and never if this request is
    /// itself superseded or cancelled before it completes. Returns the
    /// generation assigned to the request.
    pub fn fetch<F>(&self, key: &str, url: &str, on_complete: F) -> u64
    where
        F: FnOnce(Result<Vec<u8>, FetchError>) + Send + 'static,
    {
        let (generation, superseded) = self.registry.begin(key, |generation| {
            let task = run_fetch(
                Arc::clone(&self.transport),
                Arc::clone(&self.registry),
                key.to_string(),
                url.to_string(),
                generation,
                self.options.timeout,
                on_complete,
            );
            self.runtime.spawn(task).abort_handle()
        });

        tracing::debug!(
            key = %key,
            url = %url,
            generation,
            superseded,
            "Fetch started"
        );

        generation
    }

    /// Same as [`fetch`](Self::fetch), reporting through a result channel.
    pub fn request(&self, key: &str, url: &str) -> PendingFetch {
        let (sender, receiver) = oneshot::channel();
        self.fetch(key, url, move |result| {
            if sender.send(result).is_err() {
                tracing::trace!("Fetch result dropped (receiver gone)");
            }
        });
        PendingFetch { receiver }
    }

    /// Abort the in-flight request for `key`, if any. Its callback never fires.
    pub fn cancel(&self, key: &str) -> bool {
        let cancelled = self.registry.cancel(key);
        if cancelled {
            tracing::debug!(key = %key, "Cancelled request");
        }
        cancelled
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.registry.contains(key)
    }

    pub fn in_flight(&self) -> usize {
        self.registry.len()
    }
}

async fn run_fetch<T, F>(
    transport: Arc<T>,
    registry: Arc<InFlightRegistry>,
    key: String,
    url: String,
    generation: u64,
    limit: Option<Duration>,
    on_complete: F,
) where
    T: Transport,
    F: FnOnce(Result<Vec<u8>, FetchError>) + Send + 'static,
{
    let response = match limit {
        Some(limit) => match timeout(limit, transport.get(&url)).await {
            Ok(response) => response,
            Err(_) => Err(FetchError::Timeout {
                url: url.clone(),
                after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            }),
        },
        None => transport.get(&url).await,
    };
    let result = response.and_then(classify);

    if !registry.finish(&key, generation) {
        tracing::debug!(
            key = %key,
            generation,
            "Dropping completion of superseded request"
        );
        return;
    }

    match &result {
        Ok(body) => tracing::debug!(
            key = %key,
            generation,
            bytes = body.len(),
            "Fetch completed"
        ),
        Err(err) => tracing::warn!(
            key = %key,
            generation,
            kind = err.kind(),
            error = %err,
            "Fetch failed"
        ),
    }

    on_complete(result);
}
