//! Search request vocabulary
//!
//! The ranking models the backend understands and the query sent to it.

mod models;

pub use models::*;
