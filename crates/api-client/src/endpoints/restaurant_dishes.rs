//! Menu entry endpoints
//!
//! A menu entry links a catalog dish to a restaurant with a price. These
//! endpoints also back the public dish search (by city or by dish name).

use super::{OneOrMany, into_list};
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    CreateRestaurantDishDto, Paginated, RestaurantDish, UpdateRestaurantDishDto,
};

/// Menu entries API interface
#[derive(Clone, Debug)]
pub struct RestaurantDishesApi {
    client: ApiClient,
}

impl RestaurantDishesApi {
    /// Create a new menu entries API interface
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Put a catalog dish on a restaurant's menu
    ///
    /// POST /restaurantDish
    pub async fn create(&self, dto: &CreateRestaurantDishDto) -> ApiResult<RestaurantDish> {
        self.client.post("restaurantDish", dto).await
    }

    /// A restaurant's menu
    ///
    /// GET /restaurantDish/restaurant/{id}. The backend answers with a
    /// single entry or a list; both come back as a list.
    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> ApiResult<Vec<RestaurantDish>> {
        let entries: Option<OneOrMany<RestaurantDish>> = self
            .client
            .get(&format!("restaurantDish/restaurant/{restaurant_id}"))
            .await?;
        Ok(into_list(entries))
    }

    /// Dishes served in a city, one page at a time
    ///
    /// GET /restaurantDish/paginate?page=..&limit=..&countryName=..
    pub async fn paginate_by_city(
        &self,
        page: u32,
        limit: u32,
        city: &str,
    ) -> ApiResult<Paginated<RestaurantDish>> {
        self.client
            .get_with_query(
                "restaurantDish/paginate",
                &[
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                    ("countryName", city.to_string()),
                ],
            )
            .await
    }

    /// Restaurants serving a dish, one page at a time
    ///
    /// GET /restaurantDish/dish?page=..&limit=..&dishName=..
    pub async fn paginate_by_dish_name(
        &self,
        page: u32,
        limit: u32,
        dish_name: &str,
    ) -> ApiResult<Paginated<RestaurantDish>> {
        self.client
            .get_with_query(
                "restaurantDish/dish",
                &[
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                    ("dishName", dish_name.to_string()),
                ],
            )
            .await
    }

    /// Change price, description or availability
    ///
    /// PATCH /restaurantDish/{id}
    pub async fn update(
        &self,
        id: &str,
        dto: &UpdateRestaurantDishDto,
    ) -> ApiResult<RestaurantDish> {
        self.client
            .patch(&format!("restaurantDish/{id}"), dto)
            .await
    }

    /// Take a dish off the menu
    ///
    /// DELETE /restaurantDish/{id}
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("restaurantDish/{id}"))
            .await
    }
}
