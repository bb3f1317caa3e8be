//! Application Configuration
//!
//! Values are baked in at build time (`DONATION_API_BASE_URL`) and provided
//! to components through context.

use std::time::Duration;

use leptos::prelude::*;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST API root, without trailing slash
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// How long a cached query result counts as fresh
    pub query_stale_time: Duration,
    /// How long an unused cached result is kept at all
    pub query_gc_time: Duration,
    pub notification_poll_interval: Duration,
    /// Number of records kept by the in-memory log buffer
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            query_stale_time: Duration::from_secs(5 * 60),
            query_gc_time: Duration::from_secs(10 * 60),
            notification_poll_interval: Duration::from_secs(30),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Build config from compile-time environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("DONATION_API_BASE_URL") {
            config = config.with_api_base_url(url);
        }
        config
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api_base_url = trimmed.to_string();
        }
        self
    }

    /// Absolute URL for an API path such as `/projects/1`
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}

/// Get the config from context
pub fn use_config() -> AppConfig {
    expect_context::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.query_stale_time, Duration::from_secs(300));
        assert_eq!(config.query_gc_time, Duration::from_secs(600));
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = AppConfig::default().with_api_base_url("https://api.example.com/api/");
        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.endpoint("/projects"), "https://api.example.com/api/projects");
        assert_eq!(config.endpoint("projects"), "https://api.example.com/api/projects");
    }

    #[test]
    fn test_blank_base_url_ignored() {
        let config = AppConfig::default().with_api_base_url("  ");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
