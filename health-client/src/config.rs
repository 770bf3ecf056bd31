//! Client configuration

use std::time::Duration;

use shared::DEFAULT_PAGE_SIZE;

/// Quiet period bounds for the search box
pub const MIN_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 500;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 400;

/// Client configuration for connecting to the health backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HEALTH_API_URL | http://localhost:5000 | Backend base URL |
/// | HEALTH_API_TOKEN | (none) | Bearer token |
/// | HEALTH_API_TIMEOUT_SECS | 30 | Request timeout |
/// | HEALTH_SEARCH_DEBOUNCE_MS | 400 | Search quiet period (300 to 500) |
/// | HEALTH_PAGE_SIZE | 10 | Rows per list page |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Search input quiet period in milliseconds
    pub search_debounce_ms: u64,

    /// Rows per list page
    pub page_size: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Load from environment variables, falling back to defaults for
    /// anything unset or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("HEALTH_API_URL").unwrap_or(defaults.base_url),
            token: std::env::var("HEALTH_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout: std::env::var("HEALTH_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            search_debounce_ms: std::env::var("HEALTH_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(clamp_debounce)
                .unwrap_or(defaults.search_debounce_ms),
            page_size: std::env::var("HEALTH_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size: &u32| *size > 0)
                .unwrap_or(defaults.page_size),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the search quiet period, clamped to 300..=500 ms
    pub fn with_search_debounce_ms(mut self, ms: u64) -> Self {
        self.search_debounce_ms = clamp_debounce(ms);
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

fn clamp_debounce(ms: u64) -> u64 {
    ms.clamp(MIN_SEARCH_DEBOUNCE_MS, MAX_SEARCH_DEBOUNCE_MS)
}
