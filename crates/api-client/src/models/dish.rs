use super::null_to_default;
use crate::listing::ListItem;
use chrono::{DateTime, Utc};
use searchdish_core::validation::{Validate, ValidationResult, Validator};
use serde::{Deserialize, Serialize};

/// A catalog dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Opaque id
    pub id: String,
    /// Name
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    /// Description
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    /// Category, e.g. "Plat principal"
    #[serde(default, deserialize_with = "null_to_default")]
    pub category: String,
    /// Image URL
    #[serde(default, deserialize_with = "null_to_default")]
    pub image: String,
    /// Extra terms the backend matches searches against
    #[serde(default, deserialize_with = "null_to_default")]
    pub search_terms: Vec<String>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListItem for Dish {
    fn id(&self) -> &str {
        &self.id
    }

    fn haystacks(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category).filter(|c| !c.is_empty()).map(String::as_str)
    }
}

/// Body of `POST dish`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateDishDto {
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Category
    pub category: String,
}

impl Validate for CreateDishDto {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("name", &self.name)
            .required("category", &self.category)
            .validate()
    }
}

/// Body of `PATCH dish/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDishDto {
    /// Name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Validate for UpdateDishDto {
    fn validate(&self) -> ValidationResult {
        let mut validator = Validator::new();
        if let Some(name) = &self.name {
            validator = validator.required("name", name);
        }
        if let Some(category) = &self.category {
            validator = validator.required("category", category);
        }
        validator.validate()
    }
}
