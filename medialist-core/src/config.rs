//! Centralized configuration for Medialist.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use url::Url;

use crate::MedialistError;

/// Central configuration for all Medialist components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MedialistConfig {
    pub search: SearchConfig,
    pub web: WebConfig,
    pub theme: ThemeConfig,
}

/// Catalog search configuration.
///
/// Controls where the catalog lives, how requests are authenticated and how
/// aggressively keystrokes are turned into requests.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the catalog API (without trailing slash)
    pub api_base_url: String,
    /// Base URL for poster images
    pub image_base_url: String,
    /// Catalog API key
    pub api_key: Option<String>,
    /// Response language requested from the catalog
    pub language: String,
    /// Quiet period after the last keystroke before a request is issued
    pub debounce: Duration,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Serve the built-in demo catalog instead of calling the API
    pub use_demo_data: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            api_key: None,
            language: "en-US".to_string(),
            debounce: Duration::from_millis(300),
            request_timeout: Duration::from_secs(10),
            use_demo_data: false,
        }
    }
}

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Colours used by presentation components.
///
/// Passed explicitly to anything that renders, instead of being looked up
/// from ambient page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Background of the search result panel
    pub panel_background: String,
    /// Background of a hovered result row
    pub hover_background: String,
    /// Background of the expanded search input
    pub input_background: String,
    /// Search icon colour
    pub icon_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            panel_background: "#1f2937".to_string(),
            hover_background: "#374151".to_string(),
            input_background: "rgba(255, 255, 255, 0.15)".to_string(),
            icon_color: "#ffffff".to_string(),
        }
    }
}

impl MedialistConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults. Unparseable numeric values are ignored.
    ///
    /// # Errors
    /// - `MedialistError::Configuration` - A base URL override is not a valid URL
    pub fn from_env() -> Result<Self, MedialistError> {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var("MEDIALIST_TMDB_API_KEY") {
            if !api_key.trim().is_empty() {
                config.search.api_key = Some(api_key);
            }
        }

        if let Ok(base_url) = std::env::var("MEDIALIST_TMDB_BASE_URL") {
            config.search.api_base_url = parse_base_url(&base_url)?;
        }

        if let Ok(image_url) = std::env::var("MEDIALIST_TMDB_IMAGE_URL") {
            config.search.image_base_url = parse_base_url(&image_url)?;
        }

        if let Ok(debounce) = std::env::var("MEDIALIST_SEARCH_DEBOUNCE_MS") {
            if let Ok(millis) = debounce.parse::<u64>() {
                config.search.debounce = Duration::from_millis(millis);
            }
        }

        if let Ok(timeout) = std::env::var("MEDIALIST_REQUEST_TIMEOUT_SECS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.search.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(demo) = std::env::var("MEDIALIST_USE_DEMO_DATA") {
            config.search.use_demo_data = demo.parse().unwrap_or(false);
        }

        if let Ok(host) = std::env::var("MEDIALIST_WEB_HOST") {
            config.web.host = host;
        }

        if let Ok(port) = std::env::var("MEDIALIST_WEB_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.web.port = port;
            }
        }

        Ok(config)
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Demo data, no debounce and a short timeout keep tests fast and offline.
    pub fn for_testing() -> Self {
        Self {
            search: SearchConfig {
                debounce: Duration::ZERO,
                request_timeout: Duration::from_secs(1),
                use_demo_data: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Socket address string the web server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}

fn parse_base_url(raw: &str) -> Result<String, MedialistError> {
    let url = Url::parse(raw).map_err(|e| MedialistError::Configuration {
        reason: format!("invalid base URL '{raw}': {e}"),
    })?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}
