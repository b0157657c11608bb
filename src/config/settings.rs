//! Settings structures for IRSearch configuration

use crate::search::RankingModel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub ui: UiSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (IRSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("IRSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("IRSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("IRSEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("IRSEARCH_BACKEND_URL") {
            self.backend.base_url = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in the page title and header
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "IR Search".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub bind_address: String,
    /// Seconds a session survives without any request
    pub session_ttl: u64,
    /// Maximum number of live sessions
    pub max_sessions: u64,
    /// Directory served under /assets
    pub assets_dir: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
            session_ttl: 1800,
            max_sessions: 10_000,
            assets_dir: "assets".to_string(),
        }
    }
}

/// Search backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the search backend
    pub base_url: String,
    /// Path of the search endpoint, joined to `base_url`
    pub search_path: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5001".to_string(),
            search_path: "/api/search".to_string(),
            request_timeout: 10.0,
        }
    }
}

/// Initial UI state and controller behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Model selected when a session starts
    pub default_model: RankingModel,
    /// Whether the metrics grid starts expanded
    pub metrics_visible: bool,
    /// Drop responses that arrive after a newer search was started
    pub discard_stale_responses: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            default_model: RankingModel::Vector,
            metrics_visible: true,
            discard_stale_responses: true,
        }
    }
}
