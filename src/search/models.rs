//! Ranking model identifiers and the outbound search query

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Retrieval strategy offered by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingModel {
    /// TF-IDF vector space model
    #[default]
    Vector,
    /// Latent semantic analysis
    Lsa,
    Word2Vec,
    GloVe,
}

impl RankingModel {
    /// Every model, in selector order
    pub const ALL: [RankingModel; 4] = [
        RankingModel::Vector,
        RankingModel::Lsa,
        RankingModel::Word2Vec,
        RankingModel::GloVe,
    ];

    /// Identifier sent to the backend in the `model` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Lsa => "lsa",
            Self::Word2Vec => "word2vec",
            Self::GloVe => "glove",
        }
    }

    /// Label shown on the selector button
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Vector => "Vector",
            Self::Lsa => "LSA",
            Self::Word2Vec => "Word2Vec",
            Self::GloVe => "GloVe",
        }
    }
}

impl fmt::Display for RankingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a model identifier is not one of [`RankingModel::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModel(pub String);

impl fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown ranking model: {}", self.0)
    }
}

impl std::error::Error for UnknownModel {}

impl FromStr for RankingModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(id))
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

/// A single search request keyed by query text and model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Trimmed, non-empty query text
    pub query: String,
    pub model: RankingModel,
}

impl SearchQuery {
    /// Build a query, returning `None` when the text is blank
    pub fn new(text: &str, model: RankingModel) -> Option<Self> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            query: query.to_string(),
            model,
        })
    }
}
