use crate::model::{CatBreed, CatImage};
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum CatalogIntent {
    /// A fresh image batch was decoded.
    ImagesLoaded(Vec<CatImage>),
    /// A breed page was requested. Clears the breed lists until it arrives.
    BreedPageRequested { page: u32 },
    /// A breed page was decoded.
    BreedsLoaded { page: u32, breeds: Vec<CatBreed> },
    /// Search text changed.
    FilterChanged(String),
    ConnectivityChanged(bool),
}

impl Intent for CatalogIntent {}
