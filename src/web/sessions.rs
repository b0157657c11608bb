//! Per-browser controller storage

use crate::controller::SearchController;
use crate::network::HttpClient;
use crate::view::Page;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Controller driving one browser session's page
pub type SessionController = SearchController<HttpClient, Page>;

/// Shared handle to a session's controller
pub type SessionHandle = Arc<Mutex<SessionController>>;

/// Sessions expire after a period without requests
pub struct SessionStore {
    cache: Cache<Uuid, SessionHandle>,
}

impl SessionStore {
    /// Create a new store with the given idle timeout and capacity
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_idle(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    /// Look up a live session
    pub async fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.cache.get(id).await
    }

    /// Store a controller under a fresh id
    pub async fn create(&self, controller: SessionController) -> Uuid {
        let id = Uuid::new_v4();
        self.cache.insert(id, Arc::new(Mutex::new(controller))).await;
        id
    }

    /// Approximate number of live sessions
    pub fn size(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(1800, 10_000) // 30 minutes idle, 10k sessions
    }
}
