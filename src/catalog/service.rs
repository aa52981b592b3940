use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::catalog::endpoints::ApiEndpoints;
use crate::catalog::intent::CatalogIntent;
use crate::catalog::state::CatalogState;
use crate::catalog::store::CatalogStore;
use crate::config::Config;
use crate::decode::{decode, DecodeError};
use crate::fetch::{FetchCoordinator, FetchError, HttpTransport, Transport};
use crate::model::{CatBreed, CatImage};
use crate::stats::BreedStatistics;

/// Why a catalog load produced no data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// How a single load ended.
#[derive(Debug)]
pub enum LoadStatus {
    /// Data was decoded and handed to the store.
    Delivered,
    /// The load failed; published state was left untouched.
    Failed(LoadError),
    /// A newer load for the same URL replaced this one.
    Superseded,
}

/// Optional completion signal of a load. Dropping it does not cancel the load.
pub struct LoadHandle {
    receiver: oneshot::Receiver<LoadStatus>,
}

impl LoadHandle {
    pub async fn wait(self) -> LoadStatus {
        self.receiver.await.unwrap_or(LoadStatus::Superseded)
    }
}

/// Loads started by a transition to connected.
pub struct InitialLoad {
    pub images: LoadHandle,
    pub breeds: LoadHandle,
}

/// Data access façade of the catalog.
///
/// Translates domain calls into keyed fetches, decodes the responses and
/// forwards the results to the [`CatalogStore`]. Failures are logged and
/// never change the published state.
pub struct CatalogService<T: Transport = HttpTransport> {
    coordinator: FetchCoordinator<T>,
    endpoints: ApiEndpoints,
    store: CatalogStore,
    runtime: Handle,
    connected: Mutex<bool>,
}

impl CatalogService<HttpTransport> {
    pub fn from_config(config: &Config, runtime: Handle) -> Result<Self, FetchError> {
        let coordinator = FetchCoordinator::from_config(&config.fetch, runtime.clone())?;
        Ok(Self::new(
            coordinator,
            ApiEndpoints::from(&config.api),
            runtime,
        ))
    }
}

impl<T: Transport> CatalogService<T> {
    pub fn new(coordinator: FetchCoordinator<T>, endpoints: ApiEndpoints, runtime: Handle) -> Self {
        Self {
            store: CatalogStore::spawn(&runtime),
            coordinator,
            endpoints,
            runtime,
            connected: Mutex::new(false),
        }
    }

    /// Reload the image batch. On success the published images are replaced.
    pub fn fetch_images(&self) -> LoadHandle {
        let store = self.store.clone();
        self.load::<Vec<CatImage>, _>(&self.endpoints.images_url(), "images", move |images| {
            store.dispatch(CatalogIntent::ImagesLoaded(images));
        })
    }

    /// Show breed page `page`.
    ///
    /// The published breed lists are cleared before the request starts and
    /// replaced with the new page when it arrives.
    pub fn fetch_breeds(&self, page: u32) -> LoadHandle {
        self.store.dispatch(CatalogIntent::BreedPageRequested { page });

        let store = self.store.clone();
        self.load::<Vec<CatBreed>, _>(&self.endpoints.breeds_url(page), "breeds", move |breeds| {
            store.dispatch(CatalogIntent::BreedsLoaded { page, breeds });
        })
    }

    /// Narrow the visible breeds to names containing `text`, ignoring case.
    pub fn filter(&self, text: impl Into<String>) {
        self.store.dispatch(CatalogIntent::FilterChanged(text.into()));
    }

    /// Record a connectivity change. Becoming connected loads images and
    /// the first breed page; `None` when nothing was started.
    pub fn set_connected(&self, connected: bool) -> Option<InitialLoad> {
        let was_connected = std::mem::replace(&mut *self.connected.lock(), connected);
        self.store.dispatch(CatalogIntent::ConnectivityChanged(connected));

        if !connected || was_connected {
            return None;
        }

        tracing::info!("Connected, loading catalog");
        Some(InitialLoad {
            images: self.fetch_images(),
            breeds: self.fetch_breeds(0),
        })
    }

    /// Forward a connectivity stream into [`set_connected`](Self::set_connected).
    ///
    /// The current value is applied immediately. The task ends when the
    /// sending side is dropped.
    pub fn watch_connectivity(service: Arc<Self>, mut updates: watch::Receiver<bool>) -> JoinHandle<()> {
        let runtime = service.runtime.clone();
        runtime.spawn(async move {
            let connected = *updates.borrow_and_update();
            service.set_connected(connected);
            while updates.changed().await.is_ok() {
                let connected = *updates.borrow_and_update();
                service.set_connected(connected);
            }
        })
    }

    /// Letter statistics over the breeds currently visible.
    pub fn statistics(&self) -> BreedStatistics {
        BreedStatistics::from_breeds(self.store.snapshot().visible_breeds())
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> CatalogState {
        self.store.snapshot()
    }

    /// State after every update enqueued so far has been applied.
    pub async fn settled(&self) -> CatalogState {
        self.store.settled().await
    }

    pub fn coordinator(&self) -> &FetchCoordinator<T> {
        &self.coordinator
    }

    fn load<D, F>(&self, url: &str, resource: &'static str, deliver: F) -> LoadHandle
    where
        D: DeserializeOwned + 'static,
        F: FnOnce(D) + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let key = url.to_string();

        self.coordinator.fetch(url, url, move |result| {
            let decoded = result
                .map_err(LoadError::from)
                .and_then(|bytes| decode::<D>(&bytes).map_err(LoadError::from));

            let status = match decoded {
                Ok(value) => {
                    deliver(value);
                    LoadStatus::Delivered
                }
                Err(err) => {
                    tracing::warn!(
                        resource,
                        url = %key,
                        error = %err,
                        "Failed to load catalog data"
                    );
                    LoadStatus::Failed(err)
                }
            };

            if sender.send(status).is_err() {
                tracing::trace!(resource, "Load status dropped (receiver gone)");
            }
        });

        LoadHandle { receiver }
    }
}
