/// Marker trait for intents.
///
/// An intent is either a user event (new filter text, page change) or a
/// system event (a decoded fetch result) that may change the published state.
pub trait Intent: Send + 'static {}
