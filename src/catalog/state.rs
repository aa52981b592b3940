use crate::model::{CatBreed, CatImage};
use crate::mvi::UiState;

/// Everything observers of the catalog can see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogState {
    pub images: Vec<CatImage>,
    /// Breeds of the current page, unfiltered.
    pub breeds: Vec<CatBreed>,
    /// `breeds` narrowed by `filter_text`; equal to `breeds` when it is empty.
    pub filtered_breeds: Vec<CatBreed>,
    pub filter_text: String,
    /// Most recently requested breed page.
    pub page: u32,
    pub connected: bool,
}

impl UiState for CatalogState {}

impl CatalogState {
    /// Breeds currently on screen.
    pub fn visible_breeds(&self) -> &[CatBreed] {
        &self.filtered_breeds
    }
}
