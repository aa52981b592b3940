//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use catfetch::catalog::{CatalogService, CatalogState};
use catfetch::config::Config;
use catfetch::fetch::HttpTransport;
use std::net::TcpListener;
use std::time::Duration;
use tokio::runtime::Handle;

pub const IMAGES_PATH: &str = "/images/search?limit=5";

pub fn breeds_path(page: u32) -> String {
    format!("/breeds?page={}&limit=5", page)
}

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Config pointing at `base_url` with default limits.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.fetch.timeout_ms = Some(2_000);
    config
}

pub fn service_for(base_url: &str) -> CatalogService<HttpTransport> {
    CatalogService::from_config(&test_config(base_url), Handle::current())
        .expect("Failed to build catalog service")
}

/// JSON body of an image search response.
pub fn images_json(ids: &[&str]) -> String {
    let items: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id": "{id}", "url": "https://cdn2.thecatapi.com/images/{id}.jpg", "width": 800, "height": 600}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

/// JSON body of a breeds page. Every other breed carries an image.
pub fn breeds_json(names: &[&str]) -> String {
    let items: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = name.to_lowercase().replace(' ', "-");
            let image = if i % 2 == 0 {
                format!(r#"{{"id": "img{i}", "url": "https://cdn2.thecatapi.com/images/{id}.jpg"}}"#)
            } else {
                "null".to_string()
            };
            format!(
                r#"{{"id": "{id}", "name": "{name}", "description": "The {name}.", "temperament": "Calm", "image": {image}}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

/// Wait until the published state satisfies `predicate`.
pub async fn wait_for_state<F>(service: &CatalogService<HttpTransport>, predicate: F) -> CatalogState
where
    F: FnMut(&CatalogState) -> bool,
{
    let mut updates = service.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(5), updates.wait_for(predicate))
        .await
        .expect("Timed out waiting for catalog state")
        .expect("Catalog store stopped");
    state.clone()
}
