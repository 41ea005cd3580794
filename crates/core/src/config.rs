use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Path of the search endpoint, relative to `server_url`.
pub const SEARCH_PATH: &str = "/api/search";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:6969";

/// How completions of overlapping searches reach the results pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Every response renders when it resolves; the last to resolve ends up last.
    #[default]
    LastResolved,
    /// Responses belonging to a search older than the latest one are dropped.
    LatestRequest,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server_url: String,

    pub clear_before_search: bool,

    pub render_policy: RenderPolicy,

    pub show_errors: bool,

    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,

    #[serde(skip)]
    pub app_root: std::path::PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            clear_before_search: true,
            render_policy: RenderPolicy::default(),
            show_errors: false,
            request_timeout_secs: None,
            app_root: crate::path_utils::get_app_root(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // 1. Try standard dotenv discovery from current dir
        if dotenvy::dotenv().is_err() {
            // 2. Fallback: Try explicitly from the resolved SIFT_ROOT
            let path = crate::path_utils::get_app_root().join(".env");
            if path.exists() {
                let _ = dotenvy::from_path(&path);
            }
        }

        let builder = Config::builder()
            .add_source(File::with_name("sift").required(false))
            .add_source(Environment::with_prefix("SIFT"));

        Self::from_builder(builder)
    }

    /// Applies the built-in defaults underneath `builder`'s sources and deserializes.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let builder = builder
            .set_default("server_url", DEFAULT_SERVER_URL)?
            .set_default("clear_before_search", true)?
            .set_default("render_policy", "last_resolved")?
            .set_default("show_errors", false)?;

        let mut config: Self = builder.build()?.try_deserialize()?;
        if config.request_timeout_secs == Some(0) {
            return Err(ConfigError::Message(
                "request_timeout_secs must be at least 1 (leave it unset for no timeout)".to_string(),
            ));
        }
        config.app_root = crate::path_utils::get_app_root();

        Ok(config)
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Full URL the search request is POSTed to.
    pub fn search_url(&self) -> String {
        format!("{}{}", self.server_url.trim().trim_end_matches('/'), SEARCH_PATH)
    }
}
