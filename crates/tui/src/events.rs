use sift_client::SearchError;
use sift_core::ResultSet;

/// Reported by a spawned search task back to the UI loop.
#[derive(Debug)]
pub enum SearchEvent {
    Completed {
        generation: u64,
        query: String,
        outcome: Result<ResultSet, SearchError>,
    },
}
