//! Response payload returned by the search backend

use crate::search::RankingModel;
use serde::{Deserialize, Serialize};

/// Full body of a successful `/api/search` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Model that produced the ranking, echoed by the backend
    #[serde(default)]
    pub model: Option<RankingModel>,
    /// Query text, echoed by the backend
    #[serde(default)]
    pub query: Option<String>,
    /// Keywords the backend extracted from the query
    #[serde(default)]
    pub query_keywords: Option<Vec<String>>,
    /// Retrieval time in seconds
    pub time_taken: f64,
    /// Retrieval quality scores
    pub metrics: RetrievalMetrics,
    /// Results in relevance order
    pub results: Vec<ResultItem>,
}

impl SearchResponse {
    /// Query keywords, if the backend sent a non-empty list
    pub fn keywords(&self) -> Option<&[String]> {
        self.query_keywords
            .as_deref()
            .filter(|keywords| !keywords.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Quality scores computed by the backend, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub mean_reciprocal_rank: f64,
    pub ndcg: f64,
}

/// One retrieved document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Backend document id
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    pub snippet: String,
    /// Entity tags, in backend order
    #[serde(default)]
    pub entities: Vec<String>,
    pub score: f64,
}
