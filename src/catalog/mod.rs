//! Data access façade and published state of the cat catalog.

mod endpoints;
mod intent;
mod reducer;
mod service;
mod state;
mod store;

pub use endpoints::ApiEndpoints;
pub use intent::CatalogIntent;
pub use reducer::{filter_breeds, CatalogReducer};
pub use service::{CatalogService, InitialLoad, LoadError, LoadHandle, LoadStatus};
pub use state::CatalogState;
pub use store::CatalogStore;
