//! Shared list/search/filter/pagination controller
//!
//! Every list view (restaurants, dish catalog, dishes in a city, a
//! restaurant's menu, the admin grid) works the same way: fetch one page
//! from a [`PageSource`], narrow it locally with a search box and an optional
//! category, and move between pages with exactly one fetch per move.
//!
//! ```rust,no_run
//! use searchdish_api_client::listing::{ListController, ListView, RestaurantPages};
//! # async fn demo(client: searchdish_api_client::ApiClient) -> searchdish_api_client::ApiResult<()> {
//! let mut list = ListController::new(RestaurantPages::new(client.restaurants()), 9);
//! list.load().await?;
//! list.set_filter("dakar");
//! if let ListView::Items(items) = list.view() {
//!     println!("{} restaurants match", items.len());
//! }
//! # Ok(())
//! # }
//! ```

mod controller;
mod filter;
mod sources;

pub use controller::{FetchTicket, ListController, ListView};
pub use filter::{ALL_CATEGORIES, Filter, ListItem, Matcher, distinct_categories, matches_query};
pub use sources::{
    CatalogPages, CityDishPages, DishNamePages, MenuPages, PendingRestaurantPages, RestaurantPages,
};

use crate::error::{ApiError, ApiResult};
use crate::models::Paginated;
use async_trait::async_trait;

/// Errors surfaced by list loads are plain API errors
pub type ListError = ApiError;

/// Which page to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub page_size: u32,
}

impl PageRequest {
    /// Create a request
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

/// Where a list's pages come from
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Fetch one page
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Paginated<T>>;
}
