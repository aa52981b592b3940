//! Registry of in-flight requests keyed by request identity.
//!
//! Every fetch gets a generation number. Starting a request for a key that
//! already has a live entry aborts the old task and replaces the entry in the
//! same critical section, so two live handles never share a key. A finishing
//! request may only report if its generation is still the registered one.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

struct InFlightEntry {
    generation: u64,
    handle: AbortHandle,
}

struct RegistryInner {
    next_generation: u64,
    entries: HashMap<String, InFlightEntry>,
}

/// Owned, explicitly shared registry of in-flight requests.
pub struct InFlightRegistry {
    inner: Mutex<RegistryInner>,
}

impl Default for InFlightRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                next_generation: 1,
                entries: HashMap::new(),
            }),
        }
    }

    /// Register a new request for `key`, superseding any live one.
    ///
    /// `start` receives the generation assigned to the new request and must
    /// start it, returning its abort handle. It runs while the registry lock
    /// is held, so it must not block or call back into the registry. Returns
    /// the generation and whether an older request was superseded.
    pub fn begin<F>(&self, key: &str, start: F) -> (u64, bool)
    where
        F: FnOnce(u64) -> AbortHandle,
    {
        let mut inner = self.inner.lock();

        let superseded = match inner.entries.remove(key) {
            Some(old) => {
                old.handle.abort();
                tracing::debug!(
                    key = %key,
                    generation = old.generation,
                    "Cancelled previous request"
                );
                true
            }
            None => false,
        };

        let generation = inner.next_generation;
        inner.next_generation += 1;

        let handle = start(generation);
        inner
            .entries
            .insert(key.to_string(), InFlightEntry { generation, handle });

        (generation, superseded)
    }

    /// Clear the entry for `key` if it still belongs to `generation`.
    ///
    /// Returns `true` when the caller is the surviving request for the key
    /// and may deliver its outcome; `false` when it was superseded.
    pub fn finish(&self, key: &str, generation: u64) -> bool {
        let mut inner = self.inner.lock();
        match inner.entries.get(key) {
            Some(entry) if entry.generation == generation => {
                inner.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Abort and forget the in-flight request for `key`.
    pub fn cancel(&self, key: &str) -> bool {
        let mut inner = self.inner.lock();
        match inner.entries.remove(key) {
            Some(entry) => {
                entry.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
