//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one backend resource.
//!
//! | Module | Paths | Description |
//! |--------|-------|-------------|
//! | `users` | `auth/*`, `users/{id}` | Login, current user, registration, activation |
//! | `restaurants` | `restaurant/*` | Restaurant CRUD and admin approval |
//! | `dishes` | `dish/*` | Global dish catalog |
//! | `restaurant_dishes` | `restaurantDish/*` | Menu entries, search by city or dish name |
//! | `contact` | `contact` | Contact form |

pub mod contact;
pub mod dishes;
pub mod restaurant_dishes;
pub mod restaurants;
pub mod users;

pub use contact::ContactApi;
pub use dishes::DishesApi;
pub use restaurant_dishes::RestaurantDishesApi;
pub use restaurants::RestaurantsApi;
pub use users::UsersApi;

use serde::Deserialize;

/// Some endpoints answer with either one object or a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Decode `null` (an empty body) as an empty list
pub(crate) fn into_list<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(OneOrMany::into_vec).unwrap_or_default()
}
