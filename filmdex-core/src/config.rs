//! Centralized configuration for Filmdex.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Filmdex components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct FilmdexConfig {
    pub provider: ProviderConfig,
    pub search: SearchConfig,
}

/// OMDb provider endpoint and credential configuration.
///
/// Controls where requests go, which API key authenticates them, and how
/// long each request class may take before it is abandoned.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the OMDb-compatible API
    pub base_url: String,
    /// API key sent as a query parameter (None means unconfigured)
    pub api_key: Option<String>,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
    /// Timeout for one search-page request
    pub search_timeout: Duration,
    /// Timeout for one detail (by-id or by-title) request
    pub detail_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://www.omdbapi.com/".to_string(),
            api_key: None,
            user_agent: "filmdex/0.1.0",
            search_timeout: Duration::from_secs(15),
            detail_timeout: Duration::from_secs(10),
        }
    }
}

/// Search aggregation configuration.
///
/// Controls pacing between consecutive detail lookups during result
/// enrichment.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Delay inserted after every detail request
    pub detail_pacing: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            detail_pacing: Duration::from_millis(50),
        }
    }
}

impl FilmdexConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Reads `OMDB_API_KEY` for the provider credential (an empty value
    /// counts as unset) plus `FILMDEX_*` overrides for endpoint and
    /// timing parameters, keeping sensible defaults otherwise.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.provider.api_key = std::env::var("OMDB_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        if let Ok(base_url) = std::env::var("FILMDEX_OMDB_URL") {
            if !base_url.is_empty() {
                config.provider.base_url = base_url;
            }
        }

        if let Ok(timeout) = std::env::var("FILMDEX_SEARCH_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.provider.search_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(timeout) = std::env::var("FILMDEX_DETAIL_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.provider.detail_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(pacing) = std::env::var("FILMDEX_DETAIL_PACING_MS") {
            if let Ok(millis) = pacing.parse::<u64>() {
                config.search.detail_pacing = Duration::from_millis(millis);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = FilmdexConfig::default();

        assert_eq!(config.provider.base_url, "http://www.omdbapi.com/");
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.provider.search_timeout, Duration::from_secs(15));
        assert_eq!(config.provider.detail_timeout, Duration::from_secs(10));
        assert_eq!(config.search.detail_pacing, Duration::from_millis(50));
    }

    // Single test for all env handling: parallel tests sharing process
    // environment would race.
    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("OMDB_API_KEY", "");
        }
        let config = FilmdexConfig::from_env();
        assert!(
            config.provider.api_key.is_none(),
            "empty key counts as unset"
        );

        unsafe {
            std::env::set_var("OMDB_API_KEY", "test_key_123");
            std::env::set_var("FILMDEX_OMDB_URL", "http://localhost:9000/");
            std::env::set_var("FILMDEX_SEARCH_TIMEOUT", "30");
            std::env::set_var("FILMDEX_DETAIL_TIMEOUT", "5");
            std::env::set_var("FILMDEX_DETAIL_PACING_MS", "10");
        }

        let config = FilmdexConfig::from_env();

        assert_eq!(config.provider.api_key.as_deref(), Some("test_key_123"));
        assert_eq!(config.provider.base_url, "http://localhost:9000/");
        assert_eq!(config.provider.search_timeout, Duration::from_secs(30));
        assert_eq!(config.provider.detail_timeout, Duration::from_secs(5));
        assert_eq!(config.search.detail_pacing, Duration::from_millis(10));

        // Cleanup
        unsafe {
            std::env::remove_var("OMDB_API_KEY");
            std::env::remove_var("FILMDEX_OMDB_URL");
            std::env::remove_var("FILMDEX_SEARCH_TIMEOUT");
            std::env::remove_var("FILMDEX_DETAIL_TIMEOUT");
            std::env::remove_var("FILMDEX_DETAIL_PACING_MS");
        }
    }
}
