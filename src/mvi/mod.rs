//! Model-View-Intent primitives for the published catalog state.
//!
//! ```text
//! fetch result / user event ──→ Intent ──→ Reducer ──→ State ──→ observers
//! ```
//!
//! Reducers are pure; the only place that applies them is the catalog
//! store task, which keeps every state transition on one queue.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
