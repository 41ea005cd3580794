//! Sift Client - the network half of the search widget
//!
//! One search is one `POST /api/search` with the raw query as a `text/plain`
//! body. The response status is logged but never acted upon; only the body
//! decides the outcome.

mod error;

pub use error::SearchError;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use sift_core::config::AppConfig;
use sift_core::ResultSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Anything that can answer a query with a ResultSet.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<ResultSet, SearchError>;
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: Url,
}

impl SearchClient {
    pub fn new(config: &AppConfig) -> Result<Self, SearchError> {
        let search_url = config.search_url();
        let endpoint = Url::parse(&search_url)
            .map_err(|e| SearchError::InvalidEndpoint(format!("{}: {}", search_url, e)))?;

        let mut builder = Client::builder().user_agent(concat!("sift/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(SearchError::Transport)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, query: &str) -> Result<ResultSet, SearchError> {
        info!("🔎 Searching {}: {:?}", self.endpoint, query);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(query.to_owned())
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!("Search response status: {}", status);
        } else {
            warn!("⚠️ Search endpoint answered {}, decoding body anyway", status);
        }

        let body = response.bytes().await.map_err(SearchError::Body)?;
        let results = ResultSet::from_json(&body)?;
        info!("✅ {} results for {:?}", results.len(), query);

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use sift_core::DecodeError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorded {
        requests: Arc<Mutex<Vec<(Option<String>, String)>>>,
    }

    async fn record(State(recorded): State<Recorded>, headers: HeaderMap, body: String) -> &'static str {
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        recorded.requests.lock().unwrap().push((content_type, body));
        r#"[["a/b.txt", 3], ["c/d.txt", 1]]"#
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(server_url: &str) -> SearchClient {
        SearchClient::new(&AppConfig::default().with_server_url(server_url)).unwrap()
    }

    #[tokio::test]
    async fn test_search_posts_raw_query_as_plain_text() {
        let recorded = Recorded::default();
        let router = Router::new()
            .route("/api/search", post(record))
            .with_state(recorded.clone());
        let client = client_for(&serve(router).await);

        let query = "  Rust & <ownership> \"borrow\"  ";
        let results = client.search(query).await.unwrap();

        let requests = recorded.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.as_deref(), Some("text/plain"));
        // Sent verbatim: no trimming, no escaping
        assert_eq!(requests[0].1, query);

        let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a/b.txt", "c/d.txt"]);
    }

    #[tokio::test]
    async fn test_empty_query_is_sent_as_empty_body() {
        let recorded = Recorded::default();
        let router = Router::new()
            .route("/api/search", post(record))
            .with_state(recorded.clone());
        let client = client_for(&serve(router).await);

        client.search("").await.unwrap();

        assert_eq!(recorded.requests.lock().unwrap()[0].1, "");
    }

    #[tokio::test]
    async fn test_status_is_not_checked() {
        let router = Router::new().route(
            "/api/search",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, r#"[["still.txt", 2]]"#) }),
        );
        let client = client_for(&serve(router).await);

        let results = client.search("q").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let router = Router::new().route("/api/search", post(|| async { "<html>500</html>" }));
        let client = client_for(&serve(router).await);

        let err = client.search("q").await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(DecodeError::InvalidJson(_))));
    }

    #[tokio::test]
    async fn test_malformed_entry_is_a_decode_error() {
        let router = Router::new().route("/api/search", post(|| async { r#"[["a.txt", "high"]]"# }));
        let client = client_for(&serve(router).await);

        let err = client.search("q").await.unwrap_err();
        assert!(matches!(
            err,
            SearchError::Decode(DecodeError::MalformedEntry { index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr));
        let err = client.search("q").await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_request_timeout_is_enforced() {
        let router = Router::new().route(
            "/api/search",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "[]"
            }),
        );
        let config = AppConfig {
            request_timeout_secs: Some(1),
            ..AppConfig::default().with_server_url(serve(router).await)
        };
        let client = SearchClient::new(&config).unwrap();

        match client.search("slow").await {
            Err(SearchError::Transport(e)) => assert!(e.is_timeout(), "expected a timeout, got {}", e),
            other => panic!("expected a transport timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_server_url_is_rejected() {
        let config = AppConfig::default().with_server_url("not a url");
        assert!(matches!(SearchClient::new(&config), Err(SearchError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_endpoint_path() {
        let client = client_for("http://127.0.0.1:6969/");
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:6969/api/search");
    }
}
