use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Where the catalog is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root without trailing slash (default: "https://api.thecatapi.com/v1").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of images requested from the image search (default: 5).
    #[serde(default = "default_image_limit")]
    pub image_limit: u32,
    /// Breeds per page (default: 5).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Request tunables for the fetch coordinator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Total request timeout in milliseconds. Unset leaves it to the transport.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Connection timeout in milliseconds.
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "https://api.thecatapi.com/v1".to_string()
}

fn default_image_limit() -> u32 {
    5
}

fn default_page_size() -> u32 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_limit: default_image_limit(),
            page_size: default_page_size(),
        }
    }
}
