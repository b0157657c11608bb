//! IRSearch UI: search results page for comparing retrieval models
//!
//! A controller captures a query, sends it to an external search backend,
//! and renders the returned results and retrieval-quality metrics. It never
//! ranks or scores anything itself.

pub mod config;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod network;
pub mod results;
pub mod search;
pub mod view;
pub mod web;

pub use config::Settings;
pub use controller::{SearchController, UiEvent};
pub use error::{Error, Result};
pub use results::SearchResponse;
pub use search::{RankingModel, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
