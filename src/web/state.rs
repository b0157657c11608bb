//! Application state shared across handlers

use super::sessions::SessionStore;
use crate::config::Settings;
use crate::controller::{ControllerOptions, SearchController};
use crate::metrics::UsageStats;
use crate::network::HttpClient;
use crate::view::{Page, Templates};
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Backend client, cloned into every session controller
    pub client: HttpClient,
    /// Template renderer
    pub templates: Arc<Templates>,
    /// Live session controllers
    pub sessions: Arc<SessionStore>,
    /// Backend request statistics
    pub stats: Arc<UsageStats>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let sessions = Arc::new(SessionStore::new(
            settings.server.session_ttl,
            settings.server.max_sessions,
        ));
        let templates = Arc::new(Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            client,
            templates,
            sessions,
            stats: Arc::new(UsageStats::new()),
        })
    }

    /// Start a session with a fresh controller and return its id
    pub async fn new_session(&self) -> Uuid {
        let controller = SearchController::new(
            self.client.clone(),
            Page::new(),
            self.templates.clone(),
            ControllerOptions::from(&self.settings.ui),
        );
        self.sessions.create(controller).await
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
