//! Rendering substrate the controller writes to
//!
//! [`Surface`] is the write-only view of the page. [`Page`] keeps the same
//! element state in memory so a server can render it to HTML.

use crate::search::RankingModel;
use serde::Serialize;

/// Label on the toggle control while the metrics grid is shown
pub const HIDE_LABEL: &str = "Hide";
/// Label on the toggle control while the metrics grid is hidden
pub const SHOW_LABEL: &str = "Show";

/// Toggle label for a given grid visibility: the action the control performs
pub fn toggle_label(metrics_visible: bool) -> &'static str {
    if metrics_visible {
        HIDE_LABEL
    } else {
        SHOW_LABEL
    }
}

/// Page elements driven by the controller
pub trait Surface {
    /// Hide the search label, show the spinner and disable the button (or undo)
    fn set_loading(&mut self, loading: bool);

    /// Add or remove the active marker on one model control
    fn set_model_active(&mut self, model: RankingModel, active: bool);

    /// Replace the result-list markup
    fn replace_results(&mut self, html: String);

    /// Replace the metrics-grid markup
    fn replace_metrics(&mut self, html: String);

    /// Unhide the metrics section around the grid
    fn reveal_metrics_section(&mut self);

    fn set_metrics_grid_visible(&mut self, visible: bool);

    fn set_toggle_label(&mut self, label: &str);

    /// Re-run the icon library over the current markup. Icons are only
    /// annotated on elements present at call time.
    fn refresh_icons(&mut self);
}

/// State of one model selector button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelMarker {
    pub id: RankingModel,
    pub label: &'static str,
    pub active: bool,
}

/// In-memory page
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub results_html: String,
    pub metrics_html: String,
    pub metrics_section_visible: bool,
    pub metrics_grid_visible: bool,
    pub toggle_label: String,
    pub loading: bool,
    pub models: Vec<ModelMarker>,
    /// Number of icon refreshes requested so far
    pub icon_refreshes: u64,
}

impl Page {
    /// Markup as served before any search: all controls inactive, metrics
    /// section hidden
    pub fn new() -> Self {
        Self {
            results_html: String::new(),
            metrics_html: String::new(),
            metrics_section_visible: false,
            metrics_grid_visible: true,
            toggle_label: HIDE_LABEL.to_string(),
            loading: false,
            models: RankingModel::ALL
                .into_iter()
                .map(|id| ModelMarker {
                    id,
                    label: id.display_name(),
                    active: false,
                })
                .collect(),
            icon_refreshes: 0,
        }
    }

    /// Models currently carrying the active marker
    pub fn active_models(&self) -> Vec<RankingModel> {
        self.models
            .iter()
            .filter(|m| m.active)
            .map(|m| m.id)
            .collect()
    }

    /// Whether the submit button is usable
    pub fn submit_enabled(&self) -> bool {
        !self.loading
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Page {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_model_active(&mut self, model: RankingModel, active: bool) {
        if let Some(marker) = self.models.iter_mut().find(|m| m.id == model) {
            marker.active = active;
        }
    }

    fn replace_results(&mut self, html: String) {
        self.results_html = html;
    }

    fn replace_metrics(&mut self, html: String) {
        self.metrics_html = html;
    }

    fn reveal_metrics_section(&mut self) {
        self.metrics_section_visible = true;
    }

    fn set_metrics_grid_visible(&mut self, visible: bool) {
        self.metrics_grid_visible = visible;
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle_label = label.to_string();
    }

    fn refresh_icons(&mut self) {
        self.icon_refreshes += 1;
    }
}
