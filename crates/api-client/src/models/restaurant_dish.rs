use super::null_to_default;
use super::{Dish, Restaurant};
use crate::listing::ListItem;
use chrono::{DateTime, Utc};
use searchdish_core::validation::{Validate, ValidationResult, Validator};
use serde::{Deserialize, Deserializer, Serialize};

/// Currency preselected for new menu entries
pub const DEFAULT_CURRENCY: &str = "Fcfa";

/// Prices arrive as numbers, or as strings from decimal columns
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Text(String),
    }

    match Option::<Price>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Price::Number(n)) => Ok(n),
        Some(Price::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A dish on a restaurant's menu, with its price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDish {
    /// Opaque id
    pub id: String,
    /// Restaurant id
    #[serde(default, deserialize_with = "null_to_default")]
    pub restaurant_id: String,
    /// Catalog dish id
    #[serde(default, deserialize_with = "null_to_default")]
    pub dish_id: String,
    /// Price
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    /// Currency label
    #[serde(default, deserialize_with = "null_to_default")]
    pub currency: String,
    /// Restaurant-specific description
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    /// Currently served
    #[serde(default)]
    pub is_available: bool,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Restaurant, when the endpoint joins it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<Restaurant>,
    /// Catalog dish, when the endpoint joins it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish: Option<Dish>,
}

impl RestaurantDish {
    /// Dish name, or an empty string when the dish is not joined
    #[must_use]
    pub fn dish_name(&self) -> &str {
        self.dish.as_ref().map_or("", |d| d.name.as_str())
    }

    /// Restaurant name, or an empty string when not joined
    #[must_use]
    pub fn restaurant_name(&self) -> &str {
        self.restaurant.as_ref().map_or("", |r| r.name.as_str())
    }
}

impl ListItem for RestaurantDish {
    fn id(&self) -> &str {
        &self.id
    }

    fn haystacks(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str()];
        if let Some(dish) = &self.dish {
            fields.extend([
                dish.name.as_str(),
                dish.description.as_str(),
                dish.category.as_str(),
            ]);
        }
        fields
    }

    fn category(&self) -> Option<&str> {
        self.dish
            .as_ref()
            .map(|d| d.category.as_str())
            .filter(|c| !c.is_empty())
    }
}

/// Body of `POST restaurantDish`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantDishDto {
    /// Restaurant id
    pub restaurant_id: String,
    /// Catalog dish id
    pub dish_id: String,
    /// Price
    pub price: f64,
    /// Currency label
    pub currency: String,
    /// Description shown on the menu
    pub description: String,
    /// Currently served
    pub is_available: bool,
}

impl Default for CreateRestaurantDishDto {
    fn default() -> Self {
        Self {
            restaurant_id: String::new(),
            dish_id: String::new(),
            price: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
            description: String::new(),
            is_available: true,
        }
    }
}

impl Validate for CreateRestaurantDishDto {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("dishId", &self.dish_id)
            .positive("price", self.price)
            .required("description", &self.description)
            .validate()
    }
}

/// Body of `PATCH restaurantDish/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantDishDto {
    /// Price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Currency label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Currently served
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl Validate for UpdateRestaurantDishDto {
    fn validate(&self) -> ValidationResult {
        let mut validator = Validator::new();
        if let Some(price) = self.price {
            validator = validator.positive("price", price);
        }
        if let Some(description) = &self.description {
            validator = validator.required("description", description);
        }
        validator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_as_number_or_string() {
        let a: RestaurantDish =
            serde_json::from_str(r#"{"id":"m1","price":2500,"isAvailable":true}"#).unwrap();
        assert!((a.price - 2500.0).abs() < f64::EPSILON);
        assert!(a.is_available);

        let b: RestaurantDish = serde_json::from_str(r#"{"id":"m2","price":"1500.50"}"#).unwrap();
        assert!((b.price - 1500.5).abs() < f64::EPSILON);

        assert!(serde_json::from_str::<RestaurantDish>(r#"{"id":"m3","price":"cher"}"#).is_err());
    }

    #[test]
    fn test_haystacks_include_joined_dish() {
        let item: RestaurantDish = serde_json::from_str(
            r#"{"id":"m1","description":"Servi le vendredi",
                "dish":{"id":"d1","name":"Thieboudienne","category":"Plat"}}"#,
        )
        .unwrap();
        assert_eq!(item.dish_name(), "Thieboudienne");
        assert!(item.haystacks().contains(&"Thieboudienne"));
        assert_eq!(item.category(), Some("Plat"));
        assert_eq!(item.restaurant_name(), "");
    }

    #[test]
    fn test_create_defaults_and_validation() {
        let dto = CreateRestaurantDishDto::default();
        assert_eq!(dto.currency, DEFAULT_CURRENCY);
        assert!(dto.is_available);

        let result = dto.validate();
        assert!(result.error_for("dishId").is_some());
        assert!(result.error_for("price").is_some());
        assert!(result.error_for("description").is_some());

        let dto = CreateRestaurantDishDto {
            restaurant_id: "r1".to_string(),
            dish_id: "d1".to_string(),
            price: 2500.0,
            description: "Riz au poisson".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_valid());
    }
}
