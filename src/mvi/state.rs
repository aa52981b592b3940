/// Marker trait for published state.
///
/// States are cloned out to observers and compared to skip redundant
/// notifications.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
