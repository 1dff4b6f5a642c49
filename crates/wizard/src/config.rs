//! # Studio Configuration
//!
//! `StudioConfig` is read from a TOML file with two sections:
//!
//! ```toml
//! [api]
//! base_url = "https://scaffold.example.com"
//! token = "..."
//! request_timeout_secs = 30
//! poll_interval_ms = 1000
//! max_poll_attempts = 120
//!
//! [layout]
//! columns = 3
//! column_width = 260.0
//! ```
//!
//! Missing keys fall back to defaults. `SCAFFOLD_API_URL` and
//! `SCAFFOLD_API_TOKEN` override the corresponding `[api]` keys.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use studio_core::{StudioError, StudioResult};
use studio_diagram::LayoutConfig;

/// Environment variable overriding `api.base_url`
pub const ENV_API_URL: &str = "SCAFFOLD_API_URL";

/// Environment variable overriding `api.token`
pub const ENV_API_TOKEN: &str = "SCAFFOLD_API_TOKEN";

/// Default generation service address
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

// ============================================================================
// ApiConfig
// ============================================================================

/// Connection settings for the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service root, without a trailing `/api`
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Delay between job status polls
    pub poll_interval_ms: u64,

    /// Polls before a job is reported as timed out
    pub max_poll_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            request_timeout_secs: 30,
            poll_interval_ms: 1000,
            max_poll_attempts: 120,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// ============================================================================
// StudioConfig
// ============================================================================

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub api: ApiConfig,
    pub layout: LayoutConfig,
}

impl StudioConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> StudioResult<Self> {
        let config: StudioConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> StudioResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StudioError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, otherwise defaults; then apply the process environment
    pub fn resolve(path: Option<&Path>) -> StudioResult<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `SCAFFOLD_API_URL` / `SCAFFOLD_API_TOKEN` as returned by `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api.token = Some(token);
        }
        self
    }

    /// Set the service address
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api.token = Some(token.into());
        self
    }

    /// Set the job polling cadence
    pub fn with_polling(mut self, interval_ms: u64, max_attempts: u32) -> Self {
        self.api.poll_interval_ms = interval_ms;
        self.api.max_poll_attempts = max_attempts;
        self
    }

    /// Set the diagram grid
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    fn check(&self) -> StudioResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(StudioError::InvalidConfig("api.base_url cannot be empty".into()));
        }
        if self.layout.columns == 0 {
            return Err(StudioError::InvalidConfig(
                "layout.columns must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
