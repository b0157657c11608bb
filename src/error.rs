//! Error types shared by the controller, client and renderer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure, non-success status or an undecodable body.
    /// The UI shows the same apology for all of them.
    #[error("Search request failed: {0}")]
    SearchRequestFailed(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl Error {
    pub fn request_failed(reason: impl std::fmt::Display) -> Self {
        Self::SearchRequestFailed(reason.to_string())
    }

    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::SearchRequestFailed(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::request_failed(err)
    }
}
