//! Sift Core - shared model for the search widget
//!
//! - config: layered configuration (.env, sift.toml, SIFT_* env vars)
//! - path_utils: app root resolution and tilde expansion
//! - types: SearchResult / ResultSet and the response decoder
//! - render: ResultRow formatting and the ResultsContainer

pub mod config;
pub mod path_utils;
pub mod render;
pub mod types;

pub use render::{ResultRow, ResultsContainer};
pub use types::{DecodeError, ResultSet, SearchResult};

use tracing::info;

pub fn init() {
    info!("🔎 Sift Core Initialized");
}
