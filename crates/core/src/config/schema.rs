//! Configuration schema definitions

use crate::validation::{Validator, ValidationResult};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// List view settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl ConfigSchema {
    /// Check value ranges
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut validator = Validator::new()
            .range("api.timeout_secs", self.api.timeout_secs, 1, 300)
            .range("listing.page_size", self.listing.page_size, 1, 100);

        if let Some(url) = &self.api.base_url {
            validator = validator.required("api.base_url", url).url("api.base_url", url);
        }

        validator.validate()
    }
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (falls back to the hosted backend)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// List view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

/// Session persistence settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Path of the token file (defaults to the platform config directory)
    #[serde(default)]
    pub file: Option<String>,
}
