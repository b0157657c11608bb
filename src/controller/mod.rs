//! Search page controller
//!
//! Turns UI events into at most one outstanding search request and keeps the
//! rendered page consistent with [`SearchState`].

mod events;
mod search_controller;
mod state;

pub use events::{EventError, UiEvent};
pub use search_controller::{Completion, ControllerOptions, PendingSearch, SearchController};
pub use state::{ResultArea, SearchState};
