//! Metrics and result-list fragments
//!
//! Numbers are formatted here, before they reach the templates, so the
//! markup never depends on Tera's float printing.

use super::templates::{Templates, METRICS_TEMPLATE, RESULTS_TEMPLATE};
use crate::error::Result;
use crate::results::{ResultItem, SearchResponse};
use crate::search::RankingModel;
use serde::Serialize;

/// Text shown in place of the result list when a search fails
pub const ERROR_MESSAGE: &str = "Sorry, an error occurred while searching. Please try again.";

/// Result-area markup for a failed search
pub const ERROR_FRAGMENT: &str = concat!(
    "<div class=\"result-item\">",
    "<p>Sorry, an error occurred while searching. Please try again.</p>",
    "</div>"
);

/// Format a score or metric to two decimal places
pub fn format_score(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a duration in seconds to three decimal places with unit
pub fn format_seconds(value: f64) -> String {
    format!("{:.3}s", value)
}

/// One labelled card in the metrics grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    /// Feather icon name
    pub icon: &'static str,
    pub value: String,
}

/// Build the six metric cards in display order
pub fn metric_cards(response: &SearchResponse) -> Vec<MetricCard> {
    let m = &response.metrics;
    let card = |label: &'static str, icon: &'static str, value: String| MetricCard {
        label,
        icon,
        value,
    };

    vec![
        card("Time", "clock", format_seconds(response.time_taken)),
        card("Precision", "award", format_score(m.precision)),
        card("Recall", "award", format_score(m.recall)),
        card("F1 Score", "award", format_score(m.f1_score)),
        card("MRR", "bar-chart-2", format_score(m.mean_reciprocal_rank)),
        card("NDCG", "bar-chart-2", format_score(m.ndcg)),
    ]
}

#[derive(Serialize)]
struct MetricsView {
    cards: Vec<MetricCard>,
}

#[derive(Serialize)]
struct ResultCard<'a> {
    title: &'a str,
    snippet: &'a str,
    entities: &'a [String],
    score: String,
}

impl<'a> From<&'a ResultItem> for ResultCard<'a> {
    fn from(item: &'a ResultItem) -> Self {
        Self {
            title: &item.title,
            snippet: &item.snippet,
            entities: &item.entities,
            score: format_score(item.score),
        }
    }
}

#[derive(Serialize)]
struct ResultsView<'a> {
    model: RankingModel,
    keywords: &'a [String],
    results: Vec<ResultCard<'a>>,
}

/// Render the metrics grid contents
pub fn render_metrics(templates: &Templates, response: &SearchResponse) -> Result<String> {
    let view = MetricsView {
        cards: metric_cards(response),
    };
    templates.render(METRICS_TEMPLATE, &view)
}

/// Render the result list, preceded by the keywords block when the backend
/// sent at least one keyword
pub fn render_results(
    templates: &Templates,
    response: &SearchResponse,
    model: RankingModel,
) -> Result<String> {
    let view = ResultsView {
        model,
        keywords: response.keywords().unwrap_or(&[]),
        results: response.results.iter().map(ResultCard::from).collect(),
    };
    templates.render(RESULTS_TEMPLATE, &view)
}
