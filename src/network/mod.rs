//! HTTP networking module
//!
//! Provides the backend client the controller sends search requests through.

mod client;

pub use client::{HttpClient, SearchBackend};
