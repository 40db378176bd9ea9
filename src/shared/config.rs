//! Application configuration. Backend URL, timings, staleness policy.

use crate::usecases::StalenessPolicy;
use serde::Deserialize;
use std::time::Duration;

/// Backend used when `CITY_DISCUSSION_BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default quiet period after the last city keystroke before the news lookup fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the backend serving /fetch-news/ and /fetch-comments/. Read from CITY_DISCUSSION_BACKEND_URL.
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Debounce quiet period in ms (default 500). Read from CITY_DISCUSSION_DEBOUNCE_MS.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Per-request timeout in seconds (default 30). Read from CITY_DISCUSSION_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// `apply_latest` (default) or `discard_superseded`. Read from CITY_DISCUSSION_STALENESS.
    #[serde(default)]
    pub staleness: Option<StalenessPolicy>,

    // ─────────────────────────────────────────────────────────────────────────
    // Demo backend
    // ─────────────────────────────────────────────────────────────────────────
    /// Use the canned demo backend instead of HTTP. Read from CITY_DISCUSSION_DEMO.
    #[serde(default)]
    pub demo: Option<bool>,

    /// Simulated latency of the demo backend in ms (default 300). Read from CITY_DISCUSSION_DEMO_DELAY_MS.
    #[serde(default)]
    pub demo_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("CITY_DISCUSSION").try_parsing(true));
        if let Ok(path) = std::env::var("CITY_DISCUSSION_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the backend base URL. Defaults to DEFAULT_BACKEND_URL.
    pub fn backend_url_or_default(&self) -> String {
        self.backend_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    }

    /// Returns the debounce quiet period. Defaults to 500ms.
    pub fn debounce_or_default(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    /// Returns the per-request timeout. Defaults to 30s.
    pub fn request_timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(30))
    }

    pub fn staleness_or_default(&self) -> StalenessPolicy {
        self.staleness.unwrap_or_default()
    }

    /// Returns true if the demo backend should be used.
    pub fn is_demo(&self) -> bool {
        self.demo.unwrap_or(false)
    }

    /// Returns demo backend latency in ms. Defaults to 300.
    pub fn demo_delay_ms_or_default(&self) -> u64 {
        self.demo_delay_ms.unwrap_or(300)
    }
}
