//! Result types consumed by the controller
//!
//! These mirror the JSON produced by the search backend. The controller only
//! displays them and never derives new scores.

mod types;

pub use types::*;

#[cfg(test)]
pub(crate) use types::tests::sample_body;
