//! UI layer: the view model and its terminal rendering.

pub mod state;
pub mod terminal;

pub use state::UiState;
