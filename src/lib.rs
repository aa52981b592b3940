//! Headless core of a cat catalog client.
//!
//! Images and breeds are fetched from TheCatAPI through a keyed
//! [`fetch::FetchCoordinator`] that lets only the latest request per URL
//! report, decoded with [`decode::decode`], and published by the
//! [`catalog::CatalogService`] through a single update queue.

pub mod catalog;
pub mod config;
pub mod decode;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod stats;
