//! Form and input validation
//!
//! Every form is checked synchronously before anything is sent to the
//! backend. Validation failures are reported per field and are kept apart
//! from network errors.
//!
//! # Example
//!
//! ```rust
//! use searchdish_core::validation::{rules, Validator};
//!
//! let result = Validator::new()
//!     .required("name", "Chez Fatou")
//!     .min_length("name", "Chez Fatou", rules::RESTAURANT_NAME_MIN)
//!     .url("website", "")
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Length and format limits used by the client-side forms
pub mod rules {
    /// Email shape accepted by the registration form
    pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
    /// Absolute http(s) URL
    pub const URL_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*$";

    /// Login identifier minimum length
    pub const LOGIN_IDENTIFIER_MIN: usize = 8;
    /// Password minimum length (login and registration)
    pub const PASSWORD_MIN: usize = 6;
    /// Display name minimum length at registration
    pub const USER_NAME_MIN: usize = 3;

    /// Restaurant name minimum length at creation
    pub const RESTAURANT_NAME_MIN: usize = 3;
    /// Restaurant name minimum length when editing settings
    pub const RESTAURANT_SETTINGS_NAME_MIN: usize = 2;
    /// Restaurant description minimum length at creation
    pub const RESTAURANT_DESCRIPTION_MIN: usize = 10;
    /// Street address minimum length
    pub const ADDRESS_MIN: usize = 5;
    /// City/country minimum length
    pub const COUNTRY_MIN: usize = 2;
    /// Phone number minimum length
    pub const PHONE_MIN: usize = 8;

    /// Contact message minimum length
    pub const CONTACT_MESSAGE_MIN: usize = 20;

    /// Days accepted as opening-hours keys
    pub const WEEKDAYS: &[&str] = &[
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
}

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(rules::URL_PATTERN).expect("valid URL pattern"));

/// Check whether a string is an absolute http(s) URL
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// First error reported for a field, if any
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            )
            .with_suggestion("Correct the highlighted fields and submit again"))
        }
    }
}

/// Types that can check themselves before submission
pub trait Validate {
    /// Run every rule and collect the failures
    fn validate(&self) -> ValidationResult;
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    fn fail(
        mut self,
        field: &str,
        message: String,
        code: &str,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        self.result.add_error(ValidationError {
            field: field.to_string(),
            message,
            code: code.to_string(),
            expected,
            actual,
        });
        self
    }

    /// Validate that a field is not empty
    #[must_use]
    pub fn required(self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            return self.fail(
                field,
                "Field is required".to_string(),
                "REQUIRED",
                Some("non-empty value".to_string()),
                Some("empty".to_string()),
            );
        }
        self
    }

    /// Validate minimum length, counted in characters
    #[must_use]
    pub fn min_length(self, field: &str, value: &str, min: usize) -> Self {
        let len = value.chars().count();
        if len < min {
            return self.fail(
                field,
                format!("Must be at least {min} characters"),
                "MIN_LENGTH",
                Some(format!(">= {min} chars")),
                Some(format!("{len} chars")),
            );
        }
        self
    }

    /// Validate against a regex pattern
    #[must_use]
    pub fn pattern(self, field: &str, value: &str, pattern: &str, description: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(value) => self,
            Ok(_) => self.fail(
                field,
                format!("Must be {description}"),
                "PATTERN",
                Some(description.to_string()),
                Some(value.to_string()),
            ),
            Err(_) => self.fail(
                field,
                "Invalid validation pattern".to_string(),
                "INTERNAL",
                None,
                None,
            ),
        }
    }

    /// Validate an optional website: empty is accepted, anything else must be an http(s) URL
    #[must_use]
    pub fn url(self, field: &str, value: &str) -> Self {
        if value.is_empty() || is_valid_url(value) {
            return self;
        }
        self.fail(
            field,
            "Invalid URL".to_string(),
            "URL",
            Some("http(s) URL".to_string()),
            Some(value.to_string()),
        )
    }

    /// Validate that a value is in a list of allowed values
    #[must_use]
    pub fn one_of(self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if allowed.contains(&value) {
            return self;
        }
        self.fail(
            field,
            format!("Must be one of: {}", allowed.join(", ")),
            "ONE_OF",
            Some(allowed.join(", ")),
            Some(value.to_string()),
        )
    }

    /// Validate a numeric range
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            let actual = value.to_string();
            return self.fail(
                field,
                format!("Must be between {min} and {max}"),
                "RANGE",
                Some(format!("{min} - {max}")),
                Some(actual),
            );
        }
        self
    }

    /// Validate that a number is strictly positive
    #[must_use]
    pub fn positive(self, field: &str, value: f64) -> Self {
        if value > 0.0 && value.is_finite() {
            return self;
        }
        self.fail(
            field,
            "Must be greater than zero".to_string(),
            "POSITIVE",
            Some("> 0".to_string()),
            Some(value.to_string()),
        )
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
