//! Restaurant endpoints

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{CreateRestaurantDto, Paginated, Restaurant, UpdateRestaurantDto};
use crate::payload::{ImageUpload, Payload};
use reqwest::Method;
use serde_json::Value;
use tracing::{info, instrument};

/// Restaurants API interface
#[derive(Clone, Debug)]
pub struct RestaurantsApi {
    client: ApiClient,
}

impl RestaurantsApi {
    /// Create a new restaurants API interface
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Register a restaurant, optionally with a cover image
    ///
    /// POST /restaurant
    pub async fn create(
        &self,
        dto: &CreateRestaurantDto,
        image: Option<ImageUpload>,
    ) -> ApiResult<Restaurant> {
        let payload = Payload::from_dto(dto, image)?;
        self.client
            .send_payload(Method::POST, "restaurant", payload)
            .await
    }

    /// One page of restaurants
    ///
    /// GET /restaurant/paginate?limit=..&page=..
    pub async fn find_all(&self, limit: u32, page: u32) -> ApiResult<Paginated<Restaurant>> {
        self.client
            .get_with_query(
                "restaurant/paginate",
                &[("limit", limit.to_string()), ("page", page.to_string())],
            )
            .await
    }

    /// Update a restaurant's settings, optionally replacing its image
    ///
    /// PATCH /restaurant/{id}
    pub async fn update(
        &self,
        id: &str,
        dto: &UpdateRestaurantDto,
        image: Option<ImageUpload>,
    ) -> ApiResult<Restaurant> {
        let payload = Payload::from_dto(dto, image)?;
        self.client
            .send_payload(Method::PATCH, &format!("restaurant/{id}"), payload)
            .await
    }

    /// Mark a restaurant active
    ///
    /// PATCH /restaurant/activate/{id}
    pub async fn activate(&self, id: &str) -> ApiResult<Value> {
        self.client
            .patch_empty(&format!("restaurant/activate/{id}"))
            .await
    }

    /// Approve a restaurant: activate its owner and the restaurant together
    ///
    /// Both PATCHes are sent concurrently; the approval fails if either does.
    #[instrument(skip(self, restaurant), fields(restaurant_id = %restaurant.id))]
    pub async fn approve(&self, restaurant: &Restaurant) -> ApiResult<()> {
        let users = self.client.users();
        tokio::try_join!(
            users.activate(&restaurant.user_id),
            self.activate(&restaurant.id),
        )?;
        info!(owner = %restaurant.user_id, "Restaurant approved");
        Ok(())
    }
}
