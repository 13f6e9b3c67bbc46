use super::null_to_default;
use crate::listing::ListItem;
use chrono::{DateTime, Utc};
use searchdish_core::validation::{Validate, ValidationResult, Validator, rules};
use searchdish_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weekday → opening range, e.g. `"monday" → "08:00-22:00"`
pub type OpeningHours = BTreeMap<String, String>;

/// Parse `day=range` pairs into opening hours
///
/// Days are matched case-insensitively against the seven weekdays and stored
/// lowercase. A later pair for the same day replaces an earlier one.
pub fn parse_opening_hours<S: AsRef<str>>(pairs: &[S]) -> Result<OpeningHours> {
    let mut hours = OpeningHours::new();

    for pair in pairs {
        let pair = pair.as_ref();
        let Some((day, range)) = pair.split_once('=') else {
            return Err(Error::validation(format!(
                "Opening hours must look like day=range, got '{pair}'"
            )));
        };

        let day = day.trim().to_lowercase();
        if !rules::WEEKDAYS.contains(&day.as_str()) {
            return Err(Error::validation(format!("Unknown weekday '{day}'"))
                .with_suggestion(format!("Use one of: {}", rules::WEEKDAYS.join(", "))));
        }

        let range = range.trim();
        if range.is_empty() {
            return Err(Error::validation(format!("Missing opening range for {day}")));
        }

        hours.insert(day, range.to_string());
    }

    Ok(hours)
}

/// A restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Opaque id
    pub id: String,
    /// Name
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    /// Description
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    /// Street address
    #[serde(default, deserialize_with = "null_to_default")]
    pub address: String,
    /// City/country the restaurant is listed under
    #[serde(default, deserialize_with = "null_to_default")]
    pub country: String,
    /// Latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Phone number
    #[serde(default, deserialize_with = "null_to_default")]
    pub phone: String,
    /// Website (may be empty)
    #[serde(default, deserialize_with = "null_to_default")]
    pub website: String,
    /// Opening hours per weekday
    #[serde(default, deserialize_with = "null_to_default")]
    pub opening_hours: OpeningHours,
    /// Image URL
    #[serde(default, deserialize_with = "null_to_default")]
    pub image: String,
    /// Approved by an admin
    #[serde(default)]
    pub is_active: bool,
    /// Owner id
    #[serde(default, deserialize_with = "null_to_default")]
    pub user_id: String,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListItem for Restaurant {
    fn id(&self) -> &str {
        &self.id
    }

    fn haystacks(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.country.as_str()]
    }
}

/// Body of `POST restaurant`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantDto {
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Street address
    pub address: String,
    /// City/country
    pub country: String,
    /// Phone number
    pub phone: String,
    /// Website
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// New restaurants wait for admin approval
    pub is_active: bool,
    /// Opening hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    /// Owner id
    pub user_id: String,
}

impl Validate for CreateRestaurantDto {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .min_length("name", &self.name, rules::RESTAURANT_NAME_MIN)
            .min_length(
                "description",
                &self.description,
                rules::RESTAURANT_DESCRIPTION_MIN,
            )
            .min_length("address", &self.address, rules::ADDRESS_MIN)
            .min_length("country", &self.country, rules::COUNTRY_MIN)
            .min_length("phone", &self.phone, rules::PHONE_MIN)
            .url("website", self.website.as_deref().unwrap_or_default())
            .required("userId", &self.user_id)
            .validate()
    }
}

/// Body of `PATCH restaurant/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantDto {
    /// Name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Street address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Website
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Opening hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
}

impl UpdateRestaurantDto {
    /// Start from a restaurant's current settings
    #[must_use]
    pub fn from_current(restaurant: &Restaurant) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            name: restaurant.name.clone(),
            description: non_empty(&restaurant.description),
            address: non_empty(&restaurant.address),
            phone: non_empty(&restaurant.phone),
            website: non_empty(&restaurant.website),
            opening_hours: (!restaurant.opening_hours.is_empty())
                .then(|| restaurant.opening_hours.clone()),
        }
    }
}

impl Validate for UpdateRestaurantDto {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .min_length("name", &self.name, rules::RESTAURANT_SETTINGS_NAME_MIN)
            .min_length(
                "address",
                self.address.as_deref().unwrap_or_default(),
                rules::ADDRESS_MIN,
            )
            .min_length(
                "phone",
                self.phone.as_deref().unwrap_or_default(),
                rules::PHONE_MIN,
            )
            .url("website", self.website.as_deref().unwrap_or_default())
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateRestaurantDto {
        CreateRestaurantDto {
            name: "Chez Fatou".to_string(),
            description: "Cuisine sénégalaise familiale".to_string(),
            address: "12 rue Carnot".to_string(),
            country: "Dakar".to_string(),
            phone: "771234567".to_string(),
            website: None,
            is_active: false,
            opening_hours: None,
            user_id: "u1".to_string(),
        }
    }

    #[test]
    fn test_restaurant_tolerates_nulls() {
        let json = r#"{
            "id": "r1",
            "name": "Chez Fatou",
            "website": null,
            "openingHours": null,
            "latitude": 14.69,
            "isActive": true,
            "createdAt": "2025-01-10T09:30:00.000Z"
        }"#;
        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.website, "");
        assert!(restaurant.opening_hours.is_empty());
        assert_eq!(restaurant.latitude, Some(14.69));
        assert!(restaurant.is_active);
        assert!(restaurant.created_at.is_some());
    }

    #[test]
    fn test_parse_opening_hours() {
        let hours = parse_opening_hours(&["Monday=08:00-22:00", "sunday = closed"]).unwrap();
        assert_eq!(hours.get("monday").map(String::as_str), Some("08:00-22:00"));
        assert_eq!(hours.get("sunday").map(String::as_str), Some("closed"));

        assert!(parse_opening_hours(&["funday=10-12"]).is_err());
        assert!(parse_opening_hours(&["monday"]).is_err());
        assert!(parse_opening_hours(&["monday="]).is_err());
    }

    #[test]
    fn test_create_validation() {
        assert!(create_dto().validate().is_valid());

        let mut dto = create_dto();
        dto.description = "Court".to_string();
        dto.website = Some("not a url".to_string());
        let result = dto.validate();
        assert!(result.error_for("description").is_some());
        assert!(result.error_for("website").is_some());

        dto.website = Some(String::new());
        assert!(dto.validate().error_for("website").is_none());
    }

    #[test]
    fn test_create_dto_omits_absent_fields() {
        let json = serde_json::to_value(create_dto()).unwrap();
        assert!(json.get("website").is_none());
        assert_eq!(json["isActive"], false);
        assert_eq!(json["userId"], "u1");
    }

    #[test]
    fn test_update_from_current_and_validate() {
        let restaurant: Restaurant = serde_json::from_str(
            r#"{"id":"r1","name":"Yo","address":"12 rue Carnot","phone":"771234567"}"#,
        )
        .unwrap();
        let dto = UpdateRestaurantDto::from_current(&restaurant);
        assert_eq!(dto.website, None);
        assert!(dto.validate().is_valid());

        let short = UpdateRestaurantDto {
            name: "Y".to_string(),
            ..dto
        };
        assert!(short.validate().error_for("name").is_some());
    }
}
