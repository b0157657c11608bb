//! The search page controller

use super::events::UiEvent;
use super::state::{ResultArea, SearchState};
use crate::config::UiSettings;
use crate::error::Result;
use crate::network::SearchBackend;
use crate::results::SearchResponse;
use crate::search::{RankingModel, SearchQuery};
use crate::view::{self, toggle_label, Surface, Templates, ERROR_FRAGMENT};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Initial state and behaviour switches for a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub default_model: RankingModel,
    pub metrics_visible: bool,
    /// Drop completions whose request token is not the latest issued
    pub discard_stale_responses: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&UiSettings::default())
    }
}

impl From<&UiSettings> for ControllerOptions {
    fn from(ui: &UiSettings) -> Self {
        Self {
            default_model: ui.default_model,
            metrics_visible: ui.metrics_visible,
            discard_stale_responses: ui.discard_stale_responses,
        }
    }
}

/// A search that has been started but not yet completed.
///
/// Hosts that cannot hold the controller across the network call take the
/// pending search out, run [`PendingSearch::execute`], and hand the outcome
/// back through [`SearchController::complete_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    token: u64,
    query: SearchQuery,
}

impl PendingSearch {
    /// Request token, increasing with every search the controller starts
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub async fn execute<B: SearchBackend + ?Sized>(&self, backend: &B) -> Result<SearchResponse> {
        backend.search(&self.query).await
    }
}

/// How a completed search affected the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Metrics and results replaced
    Rendered,
    /// Apology shown, metrics left as they were
    Failed,
    /// A newer search was started; the page was not touched
    Discarded,
}

/// Owns the page state and keeps a [`Surface`] consistent with it
pub struct SearchController<B, S> {
    state: SearchState,
    backend: B,
    surface: S,
    templates: Arc<Templates>,
    last_response: Option<SearchResponse>,
    /// Token of the most recently started search
    issued: u64,
    discard_stale: bool,
}

impl<B, S: Surface> SearchController<B, S> {
    /// Create a controller and bring the surface in line with the initial state
    pub fn new(backend: B, surface: S, templates: Arc<Templates>, options: ControllerOptions) -> Self {
        let mut controller = Self {
            state: SearchState::new(options.default_model, options.metrics_visible),
            backend,
            surface,
            templates,
            last_response: None,
            issued: 0,
            discard_stale: options.discard_stale_responses,
        };
        controller.sync_model_markers();
        controller.sync_metrics_visibility();
        controller
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Most recent response that was rendered
    pub fn last_response(&self) -> Option<&SearchResponse> {
        self.last_response.as_ref()
    }

    /// Route an event to its handler. Returns the search to run, if the
    /// event started one.
    pub fn handle(&mut self, event: UiEvent) -> Option<PendingSearch> {
        match event {
            UiEvent::QueryInput(text) => {
                self.set_query(text);
                None
            }
            UiEvent::Submit if self.state.loading => {
                debug!("Submit ignored while a search is in flight");
                None
            }
            UiEvent::Submit => self.submit_search(),
            UiEvent::SelectModel(model) => self.select_model(model),
            UiEvent::ToggleMetrics => {
                self.toggle_metrics_panel();
                None
            }
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.query = text.into();
    }

    /// Start a search for the current query and model. Blank queries are
    /// ignored without touching the loading state.
    pub fn submit_search(&mut self) -> Option<PendingSearch> {
        let Some(query) = SearchQuery::new(&self.state.query, self.state.active_model) else {
            debug!("Ignoring blank query");
            return None;
        };

        self.issued += 1;
        self.set_loading(true);

        info!(
            "Searching '{}' with model {} (request {})",
            query.query, query.model, self.issued
        );

        Some(PendingSearch {
            token: self.issued,
            query,
        })
    }

    /// Switch the active model. Re-runs the current query when the result
    /// area has content.
    pub fn select_model(&mut self, model: RankingModel) -> Option<PendingSearch> {
        self.state.active_model = model;
        self.sync_model_markers();

        if self.state.result_area.is_populated() {
            self.submit_search()
        } else {
            None
        }
    }

    /// Flip metrics grid visibility, returning the new state
    pub fn toggle_metrics_panel(&mut self) -> bool {
        self.state.metrics_visible = !self.state.metrics_visible;
        self.sync_metrics_visibility();
        self.state.metrics_visible
    }

    /// Result-list markup for a response under the active model
    pub fn render_results(&self, response: &SearchResponse) -> Result<String> {
        view::render_results(&self.templates, response, self.state.active_model)
    }

    /// Metrics-grid markup for a response
    pub fn render_metrics(&self, response: &SearchResponse) -> Result<String> {
        view::render_metrics(&self.templates, response)
    }

    /// Apply the outcome of a search started by this controller
    pub fn complete_search(
        &mut self,
        pending: PendingSearch,
        outcome: Result<SearchResponse>,
    ) -> Completion {
        if self.discard_stale && pending.token != self.issued {
            debug!(
                "Discarding response for request {} (latest is {})",
                pending.token, self.issued
            );
            return Completion::Discarded;
        }

        let completion = match outcome.and_then(|response| self.show_response(response)) {
            Ok(()) => Completion::Rendered,
            Err(err) => {
                if err.is_request_failure() {
                    warn!("Search for '{}' failed: {}", pending.query.query, err);
                } else {
                    error!("Failed to render results: {}", err);
                }
                self.show_failure();
                Completion::Failed
            }
        };

        self.set_loading(false);
        completion
    }

    fn show_response(&mut self, response: SearchResponse) -> Result<()> {
        // Render both before touching the page so a template failure leaves
        // the metrics panel as it was
        let metrics = self.render_metrics(&response)?;
        let results = self.render_results(&response)?;
        if response.is_empty() {
            debug!("Backend returned no results");
        }

        self.surface.replace_metrics(metrics);
        self.surface.reveal_metrics_section();
        self.surface.refresh_icons();

        self.surface.replace_results(results);
        self.surface.refresh_icons();

        self.state.result_area = ResultArea::Results {
            items: response.results.len(),
            keywords: response.keywords().map_or(0, |k| k.len()),
        };
        self.last_response = Some(response);
        Ok(())
    }

    fn show_failure(&mut self) {
        self.surface.replace_results(ERROR_FRAGMENT.to_string());
        self.state.result_area = ResultArea::Failed;
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
        self.surface.set_loading(loading);
    }

    fn sync_model_markers(&mut self) {
        for model in RankingModel::ALL {
            self.surface.set_model_active(model, false);
        }
        self.surface.set_model_active(self.state.active_model, true);
    }

    fn sync_metrics_visibility(&mut self) {
        self.surface
            .set_metrics_grid_visible(self.state.metrics_visible);
        self.surface
            .set_toggle_label(toggle_label(self.state.metrics_visible));
    }
}

impl<B: SearchBackend, S: Surface> SearchController<B, S> {
    /// Handle an event and, if it started a search, run it to completion
    pub async fn dispatch(&mut self, event: UiEvent) -> Option<Completion> {
        let pending = self.handle(event)?;
        let outcome = pending.execute(&self.backend).await;
        Some(self.complete_search(pending, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::view::{sample_response, Page, ERROR_MESSAGE};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Backend that records queries and replays scripted outcomes, falling
    /// back to the sample response
    #[derive(Default)]
    struct ScriptedBackend {
        calls: Mutex<Vec<SearchQuery>>,
        script: Mutex<VecDeque<Result<SearchResponse>>>,
    }

    impl ScriptedBackend {
        fn then(self, outcome: Result<SearchResponse>) -> Self {
            self.script.lock().unwrap().push_back(outcome);
            self
        }

        fn calls(&self) -> Vec<SearchQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchBackend for ScriptedBackend {
        async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
            self.calls.lock().unwrap().push(query.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(sample_response()))
        }
    }

    fn controller_with(
        backend: ScriptedBackend,
        options: ControllerOptions,
    ) -> SearchController<ScriptedBackend, Page> {
        let templates = Arc::new(Templates::new().unwrap());
        SearchController::new(backend, Page::new(), templates, options)
    }

    fn controller(backend: ScriptedBackend) -> SearchController<ScriptedBackend, Page> {
        controller_with(backend, ControllerOptions::default())
    }

    fn http_500() -> Result<SearchResponse> {
        Err(Error::request_failed("HTTP 500"))
    }

    #[test]
    fn test_initial_surface() {
        let c = controller(ScriptedBackend::default());
        let page = c.surface();

        assert_eq!(page.active_models(), vec![RankingModel::Vector]);
        assert!(page.metrics_grid_visible);
        assert_eq!(page.toggle_label, "Hide");
        assert!(page.results_html.is_empty());
        assert!(!c.state().loading);
    }

    #[test]
    fn test_initial_surface_from_options() {
        let c = controller_with(
            ScriptedBackend::default(),
            ControllerOptions {
                default_model: RankingModel::GloVe,
                metrics_visible: false,
                discard_stale_responses: true,
            },
        );

        assert_eq!(c.surface().active_models(), vec![RankingModel::GloVe]);
        assert!(!c.surface().metrics_grid_visible);
        assert_eq!(c.surface().toggle_label, "Show");
    }

    #[tokio::test]
    async fn test_blank_query_never_searches() {
        let mut c = controller(ScriptedBackend::default());

        for text in ["", "   ", "\t\n"] {
            c.handle(UiEvent::QueryInput(text.to_string()));
            assert_eq!(c.dispatch(UiEvent::Submit).await, None);
            assert!(!c.state().loading);
            assert!(!c.surface().loading);
        }

        assert!(c.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_search_renders_metrics_and_results() {
        let mut c = controller(ScriptedBackend::default());
        c.handle(UiEvent::QueryInput("machine learning".to_string()));

        let completion = c.dispatch(UiEvent::Submit).await;
        assert_eq!(completion, Some(Completion::Rendered));

        assert_eq!(
            c.backend().calls(),
            vec![SearchQuery::new("machine learning", RankingModel::Vector).unwrap()]
        );

        let page = c.surface();
        for value in ["0.042s", "0.80", "0.75", "0.77", "0.90", "0.88"] {
            assert!(page.metrics_html.contains(value), "missing {}", value);
        }
        assert!(page.results_html.contains("ML Basics"));
        assert!(page.results_html.contains("Score: 0.95"));
        assert!(page.metrics_section_visible);
        assert_eq!(page.icon_refreshes, 2);

        assert!(!c.state().loading);
        assert!(page.submit_enabled());
        assert!(c.state().result_area.is_populated());
        assert_eq!(c.last_response(), Some(&sample_response()));
    }

    #[tokio::test]
    async fn test_failed_search_shows_apology_and_keeps_metrics() {
        let backend = ScriptedBackend::default()
            .then(Ok(sample_response()))
            .then(http_500());
        let mut c = controller(backend);
        c.set_query("machine learning");

        c.dispatch(UiEvent::Submit).await;
        let metrics_before = c.surface().metrics_html.clone();

        let completion = c.dispatch(UiEvent::Submit).await;
        assert_eq!(completion, Some(Completion::Failed));

        let page = c.surface();
        assert_eq!(page.results_html, ERROR_FRAGMENT);
        assert!(page.results_html.contains(ERROR_MESSAGE));
        assert_eq!(page.metrics_html, metrics_before);
        assert!(page.metrics_section_visible);
        assert!(!c.state().loading);
        assert!(page.submit_enabled());
        assert_eq!(c.state().result_area, ResultArea::Failed);
    }

    #[tokio::test]
    async fn test_first_search_failing_leaves_metrics_hidden() {
        let mut c = controller(ScriptedBackend::default().then(http_500()));
        c.set_query("anything");

        assert_eq!(c.dispatch(UiEvent::Submit).await, Some(Completion::Failed));
        assert!(!c.surface().metrics_section_visible);
        assert!(c.surface().metrics_html.is_empty());
        assert_eq!(c.surface().icon_refreshes, 0);
    }

    #[test]
    fn test_loading_blocks_resubmission() {
        let mut c = controller(ScriptedBackend::default());
        c.set_query("vectors");

        let pending = c.handle(UiEvent::Submit).unwrap();
        assert!(c.state().loading);
        assert!(!c.surface().submit_enabled());

        assert!(c.handle(UiEvent::Submit).is_none());

        c.complete_search(pending, Ok(sample_response()));
        assert!(!c.state().loading);
        assert!(c.surface().submit_enabled());
    }

    #[tokio::test]
    async fn test_model_switch_without_results_does_not_search() {
        let mut c = controller(ScriptedBackend::default());
        c.set_query("machine learning");

        assert_eq!(c.dispatch(UiEvent::SelectModel(RankingModel::Lsa)).await, None);
        assert_eq!(c.state().active_model, RankingModel::Lsa);
        assert_eq!(c.surface().active_models(), vec![RankingModel::Lsa]);
        assert!(c.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_model_switch_with_results_requeries_once() {
        let mut c = controller(ScriptedBackend::default());
        c.set_query("machine learning");
        c.dispatch(UiEvent::Submit).await;

        let completion = c.dispatch(UiEvent::SelectModel(RankingModel::Word2Vec)).await;
        assert_eq!(completion, Some(Completion::Rendered));

        let calls = c.backend().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].query, "machine learning");
        assert_eq!(calls[1].model, RankingModel::Word2Vec);
        assert!(c.surface().results_html.contains("data-model=\"word2vec\""));
    }

    #[tokio::test]
    async fn test_model_switch_after_failure_retries() {
        let mut c = controller(ScriptedBackend::default().then(http_500()));
        c.set_query("machine learning");
        c.dispatch(UiEvent::Submit).await;

        let completion = c.dispatch(UiEvent::SelectModel(RankingModel::GloVe)).await;
        assert_eq!(completion, Some(Completion::Rendered));
        assert_eq!(c.backend().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_response_does_not_trigger_requery() {
        let mut empty = sample_response();
        empty.results.clear();
        empty.query_keywords = Some(vec![]);

        let mut c = controller(ScriptedBackend::default().then(Ok(empty)));
        c.set_query("zzz");
        c.dispatch(UiEvent::Submit).await;

        assert_eq!(c.dispatch(UiEvent::SelectModel(RankingModel::Lsa)).await, None);
        assert_eq!(c.backend().calls().len(), 1);
    }

    #[test]
    fn test_exactly_one_model_active() {
        let mut c = controller(ScriptedBackend::default());
        let sequence = [
            RankingModel::Lsa,
            RankingModel::Lsa,
            RankingModel::GloVe,
            RankingModel::Vector,
            RankingModel::Word2Vec,
        ];

        for model in sequence {
            c.select_model(model);
            assert_eq!(c.surface().active_models(), vec![model]);
            assert_eq!(c.state().active_model, model);
        }
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut c = controller(ScriptedBackend::default());

        assert!(!c.toggle_metrics_panel());
        assert!(!c.surface().metrics_grid_visible);
        assert_eq!(c.surface().toggle_label, "Show");

        assert!(c.toggle_metrics_panel());
        assert!(c.surface().metrics_grid_visible);
        assert_eq!(c.surface().toggle_label, "Hide");
        assert!(c.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_render_keeps_toggle_state() {
        let mut c = controller(ScriptedBackend::default());
        c.dispatch(UiEvent::ToggleMetrics).await;
        c.set_query("machine learning");
        c.dispatch(UiEvent::Submit).await;

        let page = c.surface();
        assert!(page.metrics_section_visible);
        assert!(!page.metrics_grid_visible);
        assert_eq!(page.toggle_label, "Show");
        assert!(!c.state().metrics_visible);
    }

    #[tokio::test]
    async fn test_render_results_idempotent() {
        let mut c = controller(ScriptedBackend::default());
        c.set_query("machine learning");
        c.dispatch(UiEvent::Submit).await;

        let response = c.last_response().cloned().unwrap();
        let first = c.render_results(&response).unwrap();
        let second = c.render_results(&response).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, c.surface().results_html);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut c = controller(ScriptedBackend::default());
        c.set_query("machine learning");
        let first = c.submit_search().unwrap();
        c.complete_search(first, Ok(sample_response()));

        // Second search in flight when the model switch starts a third
        let slow = c.submit_search().unwrap();
        let fresh = c.select_model(RankingModel::Lsa).unwrap();
        assert!(fresh.token() > slow.token());

        let mut lsa = sample_response();
        lsa.results[0].title = "LSA ranking".to_string();
        assert_eq!(c.complete_search(fresh, Ok(lsa)), Completion::Rendered);
        assert!(!c.state().loading);

        let mut old = sample_response();
        old.results[0].title = "Old ranking".to_string();
        assert_eq!(c.complete_search(slow, Ok(old)), Completion::Discarded);

        assert!(c.surface().results_html.contains("LSA ranking"));
        assert!(!c.surface().results_html.contains("Old ranking"));
        assert!(!c.state().loading);
    }

    #[test]
    fn test_last_resolved_wins_without_guard() {
        let mut c = controller_with(
            ScriptedBackend::default(),
            ControllerOptions {
                discard_stale_responses: false,
                ..Default::default()
            },
        );
        c.set_query("machine learning");
        let first = c.submit_search().unwrap();
        c.complete_search(first, Ok(sample_response()));

        let slow = c.submit_search().unwrap();
        let fresh = c.select_model(RankingModel::Lsa).unwrap();

        let mut lsa = sample_response();
        lsa.results[0].title = "LSA ranking".to_string();
        c.complete_search(fresh, Ok(lsa));

        let mut old = sample_response();
        old.results[0].title = "Old ranking".to_string();
        assert_eq!(c.complete_search(slow, Ok(old)), Completion::Rendered);
        assert!(c.surface().results_html.contains("Old ranking"));
    }

    #[tokio::test]
    async fn test_pending_search_executes_against_backend() {
        let backend = ScriptedBackend::default();
        let mut c = controller(ScriptedBackend::default());
        c.set_query("entity linking");

        let pending = c.submit_search().unwrap();
        let response = pending.execute(&backend).await.unwrap();
        assert_eq!(backend.calls(), vec![pending.query().clone()]);
        assert_eq!(c.complete_search(pending, Ok(response)), Completion::Rendered);
    }
}
