//! HTTP request handlers

use super::sessions::SessionHandle;
use super::state::AppState;
use crate::controller::{PendingSearch, UiEvent};
use crate::view::PAGE_TEMPLATE;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use std::time::Instant;
use tera::Context;
use uuid::Uuid;

/// Payload attached to a page event
#[derive(Debug, Deserialize)]
pub struct EventParams {
    /// Input text for submits, model id for model clicks
    pub value: Option<String>,
}

fn session_url(id: &Uuid) -> String {
    format!("/session/{}", id)
}

/// Home page handler: starts a session
pub async fn index(State(state): State<AppState>) -> Redirect {
    let id = state.new_session().await;
    tracing::debug!("Created session {}", id);
    Redirect::to(&session_url(&id))
}

/// Render a session's page
pub async fn page(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let Some(session) = state.sessions.get(&id).await else {
        return Redirect::to("/").into_response();
    };

    let html = {
        let controller = session.lock().await;

        let mut ctx = Context::new();
        ctx.insert("instance_name", state.instance_name());
        ctx.insert("session_id", &id.to_string());
        ctx.insert("query", &controller.state().query);
        ctx.insert("page", controller.surface());

        state.templates.render_with_context(PAGE_TEMPLATE, &ctx)
    };

    match html {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Feed a page event to the session's controller
///
/// The session lock is released while the backend request runs, so a second
/// event for the same session can start a newer search in the meantime.
pub async fn event(
    State(state): State<AppState>,
    Path((id, event_id)): Path<(Uuid, String)>,
    Query(params): Query<EventParams>,
) -> Response {
    let Some(session) = state.sessions.get(&id).await else {
        return Redirect::to("/").into_response();
    };

    let event = match UiEvent::from_dom(&event_id, params.value.as_deref()) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Rejected event {} for session {}: {} (expected one of: {})",
                event_id,
                id,
                e,
                UiEvent::known_ids().collect::<Vec<_>>().join(", ")
            );
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let pending = {
        let mut controller = session.lock().await;
        // Form submits carry the input text along with the click. A submit
        // ignored while loading leaves the in-flight query in place.
        if event.is_submit() && !controller.state().loading {
            if let Some(text) = params.value {
                controller.handle(UiEvent::QueryInput(text));
            }
        }
        controller.handle(event)
    };

    if let Some(pending) = pending {
        // Completion must run even if the client goes away mid-search,
        // otherwise the session stays loading
        let search = tokio::spawn(run_search(state.clone(), session, pending));
        if let Err(e) = search.await {
            tracing::error!("Search task for session {} failed: {}", id, e);
        }
    }

    Redirect::to(&session_url(&id)).into_response()
}

/// Run a started search against the backend and hand the outcome back to
/// the session's controller
async fn run_search(state: AppState, session: SessionHandle, pending: PendingSearch) {
    let start = Instant::now();
    let outcome = pending.execute(&state.client).await;
    state
        .stats
        .record(pending.query().model, start.elapsed(), outcome.is_ok());

    let token = pending.token();
    let completion = session.lock().await.complete_search(pending, outcome);
    tracing::debug!("Request {} completed: {:?}", token, completion);
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Usage statistics handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "sessions": state.sessions.size(),
        "usage": state.stats.snapshot(),
    }))
}
