//! UI state owned by a controller

use crate::search::RankingModel;

/// What the result area currently shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultArea {
    /// Nothing rendered yet
    #[default]
    Empty,
    /// A successful response with `items` results and `keywords` query keywords
    Results { items: usize, keywords: usize },
    /// The apology message
    Failed,
}

impl ResultArea {
    /// Whether the area has any visible content. An empty response with no
    /// keywords leaves the area blank.
    pub fn is_populated(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Results { items, keywords } => *items > 0 || *keywords > 0,
            Self::Failed => true,
        }
    }
}

/// Search page state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Raw text of the search input
    pub query: String,
    pub active_model: RankingModel,
    pub metrics_visible: bool,
    /// A search is outstanding; the submit control is disabled
    pub loading: bool,
    pub result_area: ResultArea,
}

impl SearchState {
    pub fn new(active_model: RankingModel, metrics_visible: bool) -> Self {
        Self {
            query: String::new(),
            active_model,
            metrics_visible,
            loading: false,
            result_area: ResultArea::Empty,
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(RankingModel::Vector, true)
    }
}
