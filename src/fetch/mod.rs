//! Keyed HTTP fetching with supersession.
//!
//! A [`FetchCoordinator`] issues GET requests through a [`Transport`],
//! tracks them in an [`InFlightRegistry`] keyed by request identity (the
//! URL), cancels a request when a newer one arrives for the same key, and
//! classifies responses into raw bytes or a [`FetchError`].

mod coordinator;
mod error;
mod registry;
mod transport;

pub use coordinator::{FetchCoordinator, FetchOptions, FetchOutcome, PendingFetch};
pub use error::{classify, FetchError, RawResponse};
pub use registry::InFlightRegistry;
pub use transport::{HttpTransport, Transport};
