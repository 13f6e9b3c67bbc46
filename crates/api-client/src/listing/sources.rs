//! [`PageSource`] adapters over the repositories

use super::{PageRequest, PageSource};
use crate::endpoints::{DishesApi, RestaurantDishesApi, RestaurantsApi};
use crate::error::ApiResult;
use crate::models::{Dish, Paginated, Restaurant, RestaurantDish};
use async_trait::async_trait;

/// All restaurants, paginated by the server
#[derive(Debug, Clone)]
pub struct RestaurantPages {
    api: RestaurantsApi,
}

impl RestaurantPages {
    /// Page through every restaurant
    #[must_use]
    pub fn new(api: RestaurantsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource<Restaurant> for RestaurantPages {
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Paginated<Restaurant>> {
        self.api.find_all(request.page_size, request.page).await
    }
}

/// Restaurants still awaiting approval, one server page at a time
///
/// Active restaurants are dropped from each fetched page; the page count
/// and total stay those of the full listing.
#[derive(Debug, Clone)]
pub struct PendingRestaurantPages {
    inner: RestaurantPages,
}

impl PendingRestaurantPages {
    /// Keep only inactive restaurants from `inner`
    #[must_use]
    pub fn new(inner: RestaurantPages) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl PageSource<Restaurant> for PendingRestaurantPages {
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Paginated<Restaurant>> {
        let mut page = self.inner.fetch_page(request).await?;
        page.data.retain(|r| !r.is_active);
        Ok(page)
    }
}

/// Menu entries in one city, paginated by the server
#[derive(Debug, Clone)]
pub struct CityDishPages {
    api: RestaurantDishesApi,
    city: String,
}

impl CityDishPages {
    /// Page through dishes served in `city`
    pub fn new(api: RestaurantDishesApi, city: impl Into<String>) -> Self {
        Self {
            api,
            city: city.into(),
        }
    }
}

#[async_trait]
impl PageSource<RestaurantDish> for CityDishPages {
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Paginated<RestaurantDish>> {
        self.api
            .paginate_by_city(request.page, request.page_size, &self.city)
            .await
    }
}

/// Menu entries whose dish matches a name, searched by the server
#[derive(Debug, Clone)]
pub struct DishNamePages {
    api: RestaurantDishesApi,
    name: String,
}

impl DishNamePages {
    /// Page through restaurants serving `name`
    pub fn new(api: RestaurantDishesApi, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
        }
    }
}

#[async_trait]
impl PageSource<RestaurantDish> for DishNamePages {
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Paginated<RestaurantDish>> {
        self.api
            .paginate_by_dish_name(request.page, request.page_size, &self.name)
            .await
    }
}

/// The dish catalog, served whole as a single page
#[derive(Debug, Clone)]
pub struct CatalogPages {
    api: DishesApi,
}

impl CatalogPages {
    /// Wrap the unpaginated catalog endpoint
    #[must_use]
    pub fn new(api: DishesApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource<Dish> for CatalogPages {
    async fn fetch_page(&self, _request: PageRequest) -> ApiResult<Paginated<Dish>> {
        Ok(Paginated::single_page(self.api.find_all().await?))
    }
}

/// One restaurant's menu, served whole as a single page
#[derive(Debug, Clone)]
pub struct MenuPages {
    api: RestaurantDishesApi,
    restaurant_id: String,
}

impl MenuPages {
    /// Wrap the unpaginated menu endpoint for `restaurant_id`
    pub fn new(api: RestaurantDishesApi, restaurant_id: impl Into<String>) -> Self {
        Self {
            api,
            restaurant_id: restaurant_id.into(),
        }
    }
}

#[async_trait]
impl PageSource<RestaurantDish> for MenuPages {
    async fn fetch_page(&self, _request: PageRequest) -> ApiResult<Paginated<RestaurantDish>> {
        let entries = self.api.find_by_restaurant(&self.restaurant_id).await?;
        Ok(Paginated::single_page(entries))
    }
}
