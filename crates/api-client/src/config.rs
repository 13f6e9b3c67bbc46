//! Configuration for the SearchDish API client
//!
//! Values come from, in increasing priority: built-in defaults, the
//! `searchdish-core` configuration file, environment variables.

use crate::error::{ApiError, ApiResult};
use crate::storage::FileTokenStore;
use searchdish_core::config::Config;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Hosted backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://restaurant-searchdish-production-fa05.up.railway.app/api/v1";

/// Overrides the API base URL
pub const API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";
/// Overrides the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "SEARCHDISH_TIMEOUT_SECS";
/// Overrides the session file location
pub const SESSION_FILE_ENV: &str = "SEARCHDISH_SESSION_FILE";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Session file (defaults to the platform config directory)
    pub session_file: Option<PathBuf>,
    /// Page size used by list views
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            session_file: None,
            page_size: 10,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables only
    ///
    /// Reads the following environment variables:
    /// - `NEXT_PUBLIC_API_URL`: base URL of the REST API
    /// - `SEARCHDISH_TIMEOUT_SECS`: request timeout in seconds
    /// - `SEARCHDISH_SESSION_FILE`: where tokens are persisted
    pub fn from_env() -> ApiResult<Self> {
        Self::from_config(&Config::default())
    }

    /// Create configuration from a loaded config file plus environment overrides
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::from_sources(config, |key| env::var(key).ok())
    }

    /// Resolve configuration with an explicit environment lookup
    pub fn from_sources(config: &Config, lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let schema = &config.schema;

        let base_url = lookup(API_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .or_else(|| schema.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = lookup(TIMEOUT_ENV)
            .and_then(|s| s.parse().ok())
            .map_or(Duration::from_secs(schema.api.timeout_secs), Duration::from_secs);

        let session_file = lookup(SESSION_FILE_ENV)
            .map(PathBuf::from)
            .or_else(|| schema.session.file.as_ref().map(PathBuf::from));

        let config = Self {
            base_url,
            timeout,
            session_file,
            page_size: schema.listing.page_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Session file to use, falling back to the platform default
    #[must_use]
    pub fn session_file_path(&self) -> Option<PathBuf> {
        self.session_file.clone().or_else(FileTokenStore::default_path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.page_size == 0 {
            return Err(ApiError::config("page_size cannot be zero"));
        }

        Ok(())
    }
}
