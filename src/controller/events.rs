//! UI events and the table mapping page event identifiers onto them

use crate::search::{RankingModel, UnknownModel};
use thiserror::Error;

/// A user action the controller reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The search input's text changed
    QueryInput(String),
    /// Search button clicked or Enter pressed in the input
    Submit,
    SelectModel(RankingModel),
    ToggleMetrics,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Unknown event: {0}")]
    Unknown(String),

    #[error("Event {0} requires a value")]
    MissingValue(&'static str),

    #[error(transparent)]
    Model(#[from] UnknownModel),
}

type Parser = fn(Option<&str>) -> Result<UiEvent, EventError>;

/// `element:event` identifiers understood by the controller
const DISPATCH: &[(&str, Parser)] = &[
    ("search-btn:click", submit),
    ("search-input:enter", submit),
    ("search-input:input", query_input),
    ("model-btn:click", model_click),
    ("toggle-metrics:click", toggle_metrics),
];

fn submit(_: Option<&str>) -> Result<UiEvent, EventError> {
    Ok(UiEvent::Submit)
}

fn query_input(value: Option<&str>) -> Result<UiEvent, EventError> {
    Ok(UiEvent::QueryInput(value.unwrap_or_default().to_string()))
}

fn model_click(value: Option<&str>) -> Result<UiEvent, EventError> {
    let id = value.ok_or(EventError::MissingValue("model-btn:click"))?;
    Ok(UiEvent::SelectModel(id.parse()?))
}

fn toggle_metrics(_: Option<&str>) -> Result<UiEvent, EventError> {
    Ok(UiEvent::ToggleMetrics)
}

impl UiEvent {
    /// Translate a page event into a [`UiEvent`]. `value` carries the
    /// element's payload: input text, or the clicked model's identifier.
    pub fn from_dom(event_id: &str, value: Option<&str>) -> Result<Self, EventError> {
        DISPATCH
            .iter()
            .find(|(id, _)| *id == event_id)
            .ok_or_else(|| EventError::Unknown(event_id.to_string()))
            .and_then(|(_, parse)| parse(value))
    }

    /// Identifiers accepted by [`UiEvent::from_dom`]
    pub fn known_ids() -> impl Iterator<Item = &'static str> {
        DISPATCH.iter().map(|(id, _)| *id)
    }

    pub fn is_submit(&self) -> bool {
        matches!(self, Self::Submit)
    }
}
