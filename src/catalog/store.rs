//! Single owner of the published catalog state.
//!
//! All state transitions go through one task that drains an intent queue,
//! applies [`CatalogReducer`] and publishes the result on a `watch` channel.
//! Fetch callbacks and UI events only enqueue intents, so observers never
//! see interleaved updates.

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};

use crate::catalog::intent::CatalogIntent;
use crate::catalog::reducer::CatalogReducer;
use crate::catalog::state::CatalogState;
use crate::mvi::Reducer;

enum StoreMessage {
    Apply(CatalogIntent),
    Settle(oneshot::Sender<CatalogState>),
}

#[derive(Clone)]
pub struct CatalogStore {
    sender: mpsc::UnboundedSender<StoreMessage>,
    state: watch::Receiver<CatalogState>,
}

impl CatalogStore {
    /// Start the store task on `runtime`.
    ///
    /// The task stops once every handle to the store is dropped.
    pub fn spawn(runtime: &Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (publisher, state) = watch::channel(CatalogState::default());
        runtime.spawn(run_store(receiver, publisher));
        Self { sender, state }
    }

    /// Enqueue an intent. Never blocks.
    pub fn dispatch(&self, intent: CatalogIntent) {
        if self.sender.send(StoreMessage::Apply(intent)).is_err() {
            tracing::warn!("Catalog store stopped, intent dropped");
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.clone()
    }

    /// Latest published state.
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// State after every intent enqueued before this call has been applied.
    pub async fn settled(&self) -> CatalogState {
        let (respond_to, receiver) = oneshot::channel();
        if self.sender.send(StoreMessage::Settle(respond_to)).is_err() {
            return self.snapshot();
        }
        match receiver.await {
            Ok(state) => state,
            Err(_) => self.snapshot(),
        }
    }
}

async fn run_store(
    mut receiver: mpsc::UnboundedReceiver<StoreMessage>,
    publisher: watch::Sender<CatalogState>,
) {
    let mut state = CatalogState::default();

    while let Some(message) = receiver.recv().await {
        match message {
            StoreMessage::Apply(intent) => {
                let next = CatalogReducer::reduce(state.clone(), intent);
                if next != state {
                    state = next;
                    publisher.send_replace(state.clone());
                }
            }
            StoreMessage::Settle(respond_to) => {
                if respond_to.send(state.clone()).is_err() {
                    tracing::trace!("Catalog settle response dropped (receiver gone)");
                }
            }
        }
    }

    tracing::debug!("Catalog store stopped");
}
