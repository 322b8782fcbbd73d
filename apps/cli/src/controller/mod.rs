//! Controller layer: view events, the upload flow, and busy-state transitions.

pub mod events;
pub mod upload;

pub use events::{SubmitOutcome, UiEvent};
pub use upload::UploadController;
