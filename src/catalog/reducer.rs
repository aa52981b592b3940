use crate::catalog::intent::CatalogIntent;
use crate::catalog::state::CatalogState;
use crate::model::CatBreed;
use crate::mvi::Reducer;

pub struct CatalogReducer;

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Intent = CatalogIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CatalogIntent::ImagesLoaded(images) => CatalogState { images, ..state },
            CatalogIntent::BreedPageRequested { page } => CatalogState {
                breeds: Vec::new(),
                filtered_breeds: Vec::new(),
                filter_text: String::new(),
                page,
                ..state
            },
            CatalogIntent::BreedsLoaded { page, breeds } => {
                if page != state.page {
                    // Late answer for a page the user already left.
                    return state;
                }
                // A new page is shown unfiltered.
                CatalogState {
                    filtered_breeds: breeds.clone(),
                    breeds,
                    filter_text: String::new(),
                    ..state
                }
            }
            CatalogIntent::FilterChanged(filter_text) => CatalogState {
                filtered_breeds: filter_breeds(&state.breeds, &filter_text),
                filter_text,
                ..state
            },
            CatalogIntent::ConnectivityChanged(connected) => CatalogState { connected, ..state },
        }
    }
}

/// Breeds whose name contains `query`, ignoring case, in their original order.
///
/// An empty query keeps every breed.
pub fn filter_breeds(breeds: &[CatBreed], query: &str) -> Vec<CatBreed> {
    if query.is_empty() {
        return breeds.to_vec();
    }
    let needle = query.to_lowercase();
    breeds
        .iter()
        .filter(|breed| breed.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
