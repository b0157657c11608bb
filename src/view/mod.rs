//! Rendering
//!
//! Tera templates for the page shell and the two fragments the controller
//! swaps in, plus the [`Surface`] abstraction over the page itself.

mod fragments;
mod surface;
mod templates;

pub use fragments::{
    format_score, format_seconds, metric_cards, render_metrics, render_results, MetricCard,
    ERROR_FRAGMENT, ERROR_MESSAGE,
};
pub use surface::{toggle_label, ModelMarker, Page, Surface, HIDE_LABEL, SHOW_LABEL};
pub use templates::{Templates, PAGE_TEMPLATE};

#[cfg(test)]
pub(crate) use fragments::tests::sample_response;
