//! Core utilities for the SearchDish client
//!
//! This crate provides functionality shared by the API client and the CLI:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Validation**: a fluent validator plus the form rules applied before any
//!   data is sent to the backend
//! - **Configuration**: TOML-based configuration with environment overrides
//!
//! # Example
//!
//! ```rust
//! use searchdish_core::validation::{rules, Validator};
//!
//! let result = Validator::new()
//!     .required("email", "chef@bistro.fr")
//!     .pattern("email", "chef@bistro.fr", rules::EMAIL_PATTERN, "an email address")
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{Validate, ValidationResult, Validator};
}
