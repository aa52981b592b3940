//! Domain values decoded from TheCatAPI responses.
//!
//! Unknown fields in the payloads are ignored; every field without a
//! `serde(default)` is required.

use serde::{Deserialize, Serialize};

/// One entry of the image search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatImage {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// One entry of the breeds endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatBreed {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Reference image. `null` and absent both decode to `None`.
    #[serde(default)]
    pub image: Option<BreedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedImage {
    pub url: String,
}

impl CatBreed {
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().map(|image| image.url.as_str())
    }
}
