//! Dish catalog endpoints

use super::{OneOrMany, into_list};
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{CreateDishDto, Dish, UpdateDishDto};
use crate::payload::{ImageUpload, Payload};
use reqwest::Method;

/// Dish catalog API interface
#[derive(Clone, Debug)]
pub struct DishesApi {
    client: ApiClient,
}

impl DishesApi {
    /// Create a new dishes API interface
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The whole catalog (unpaginated)
    ///
    /// GET /dish
    pub async fn find_all(&self) -> ApiResult<Vec<Dish>> {
        let dishes: Option<OneOrMany<Dish>> = self.client.get("dish").await?;
        Ok(into_list(dishes))
    }

    /// Add a catalog entry
    ///
    /// POST /dish
    pub async fn create(&self, dto: &CreateDishDto) -> ApiResult<Dish> {
        self.client.post("dish", dto).await
    }

    /// Update a catalog entry, optionally with a new image
    ///
    /// PATCH /dish/{id}
    pub async fn update(
        &self,
        id: &str,
        dto: &UpdateDishDto,
        image: Option<ImageUpload>,
    ) -> ApiResult<Dish> {
        let payload = Payload::from_dto(dto, image)?;
        self.client
            .send_payload(Method::PATCH, &format!("dish/{id}"), payload)
            .await
    }

    /// Remove a catalog entry
    ///
    /// DELETE /dish/{id}
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("dish/{id}")).await
    }
}
