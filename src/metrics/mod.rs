//! Usage statistics
//!
//! Counts searches sent to the backend and how they went, per ranking model.
//! These are operational numbers; retrieval-quality metrics come from the
//! backend and are only displayed.

use crate::search::RankingModel;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// Number of response times kept per model
const RESPONSE_WINDOW: usize = 100;

#[derive(Debug, Default)]
struct ModelCounters {
    searches: u64,
    failures: u64,
    response_times: VecDeque<u64>,
}

/// Collector shared by all sessions
pub struct UsageStats {
    total_searches: AtomicU64,
    models: RwLock<HashMap<RankingModel, ModelCounters>>,
}

impl UsageStats {
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Record one completed backend request
    pub fn record(&self, model: RankingModel, elapsed: Duration, success: bool) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);

        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        let counters = models.entry(model).or_default();
        counters.searches += 1;
        if !success {
            counters.failures += 1;
        }

        if counters.response_times.len() >= RESPONSE_WINDOW {
            counters.response_times.pop_front();
        }
        counters.response_times.push_back(elapsed.as_millis() as u64);
    }

    pub fn total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Average response time over the recent window, in milliseconds
    pub fn avg_response_time(&self, model: RankingModel) -> Option<u64> {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        models.get(&model).and_then(|c| {
            if c.response_times.is_empty() {
                None
            } else {
                Some(c.response_times.iter().sum::<u64>() / c.response_times.len() as u64)
            }
        })
    }

    /// Percentage of successful requests for a model
    pub fn success_rate(&self, model: RankingModel) -> f64 {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        match models.get(&model) {
            Some(c) if c.searches > 0 => {
                ((c.searches - c.failures) as f64 / c.searches as f64) * 100.0
            }
            _ => 100.0,
        }
    }

    /// Snapshot for the stats endpoint, in selector order
    pub fn snapshot(&self) -> StatsSnapshot {
        let models = RankingModel::ALL
            .into_iter()
            .map(|model| {
                let (searches, failures) = {
                    let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
                    models
                        .get(&model)
                        .map_or((0, 0), |c| (c.searches, c.failures))
                };
                ModelStats {
                    model,
                    searches,
                    failures,
                    avg_response_time_ms: self.avg_response_time(model),
                    success_rate: self.success_rate(model),
                }
            })
            .collect();

        StatsSnapshot {
            total_searches: self.total_searches(),
            models,
        }
    }
}

impl Default for UsageStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub total_searches: u64,
    pub models: Vec<ModelStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelStats {
    pub model: RankingModel,
    pub searches: u64,
    pub failures: u64,
    pub avg_response_time_ms: Option<u64>,
    pub success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_stats() {
        let stats = UsageStats::new();

        stats.record(RankingModel::Vector, Duration::from_millis(100), true);
        stats.record(RankingModel::Vector, Duration::from_millis(300), false);

        assert_eq!(stats.total_searches(), 2);
        assert_eq!(stats.avg_response_time(RankingModel::Vector), Some(200));
        assert_eq!(stats.success_rate(RankingModel::Vector), 50.0);
        assert_eq!(stats.avg_response_time(RankingModel::Lsa), None);
        assert_eq!(stats.success_rate(RankingModel::Lsa), 100.0);
    }

    #[test]
    fn test_response_window() {
        let stats = UsageStats::new();
        for _ in 0..RESPONSE_WINDOW {
            stats.record(RankingModel::GloVe, Duration::from_millis(10), true);
        }
        stats.record(RankingModel::GloVe, Duration::from_millis(1010), true);

        // Oldest sample dropped: 99 * 10 + 1010 over 100 samples
        assert_eq!(stats.avg_response_time(RankingModel::GloVe), Some(20));
    }

    #[test]
    fn test_snapshot_lists_every_model() {
        let stats = UsageStats::new();
        stats.record(RankingModel::Lsa, Duration::from_millis(5), true);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_searches, 1);
        assert_eq!(snapshot.models.len(), RankingModel::ALL.len());
        assert_eq!(snapshot.models[1].model, RankingModel::Lsa);
        assert_eq!(snapshot.models[1].searches, 1);
        assert_eq!(snapshot.models[0].searches, 0);
    }
}
