//! Wire types for the SearchDish backend
//!
//! Entities are read leniently: the backend omits or nulls fields depending
//! on the endpoint (`auth/me` returns a bare `{id, role}` for some
//! deployments), so most fields fall back to their default.

mod contact;
mod dish;
mod page;
mod restaurant;
mod restaurant_dish;
mod user;

pub use contact::{ContactMessage, ContactSubject};
pub use dish::{CreateDishDto, Dish, UpdateDishDto};
pub use page::Paginated;
pub use restaurant::{
    CreateRestaurantDto, OpeningHours, Restaurant, UpdateRestaurantDto, parse_opening_hours,
};
pub use restaurant_dish::{
    CreateRestaurantDishDto, DEFAULT_CURRENCY, RestaurantDish, UpdateRestaurantDishDto,
};
pub use user::{AuthResponse, AuthToken, LoginRequest, RegisterDto, Role, User};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
