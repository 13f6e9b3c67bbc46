use searchdish_core::validation::{Validate, ValidationResult, Validator, rules};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why the user is writing in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    /// Praise for a restaurant or dish
    #[default]
    Appreciation,
    /// Problem report
    Report,
    /// Idea for the service
    Suggestion,
}

impl ContactSubject {
    /// Accepted wire values
    pub const ALL: [&'static str; 3] = ["appreciation", "report", "suggestion"];

    /// Wire value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Appreciation => "appreciation",
            Self::Report => "report",
            Self::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactSubject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appreciation" => Ok(Self::Appreciation),
            "report" => Ok(Self::Report),
            "suggestion" => Ok(Self::Suggestion),
            other => Err(format!(
                "unknown subject '{other}', expected one of: {}",
                Self::ALL.join(", ")
            )),
        }
    }
}

/// Contact form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Sender name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Subject
    pub subject: ContactSubject,
    /// Message body
    pub message: String,
    /// Restaurant concerned, if any
    pub restaurant_name: String,
    /// Dish concerned, if any
    pub dish_name: String,
    /// Free description of the dish
    pub dish_description: String,
    /// Sender's user id (filled in from the session)
    pub user_id: String,
    /// Sender's account email (filled in from the session)
    pub user_email: String,
}

impl Validate for ContactMessage {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .one_of("subject", self.subject.as_str(), &ContactSubject::ALL)
            .min_length("message", &self.message, rules::CONTACT_MESSAGE_MIN)
            .validate()
    }
}
