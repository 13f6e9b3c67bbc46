//! Typed client for the SearchDish restaurant/dish backend
//!
//! This crate holds everything a SearchDish front end needs besides
//! rendering: the HTTP client, persisted session tokens, the session service,
//! one repository per backend resource and the list controller shared by
//! every paginated view.
//!
//! # Features
//!
//! - **Environment-based configuration**: base URL, timeout and session file
//!   from a config file and environment variables
//! - **Bearer auth from storage**: the token is read on every request
//! - **JSON or multipart writes**: image uploads are encoded in one place
//! - **Request correlation**: every request carries a unique `X-Request-ID`
//! - **Page-local search**: list views filter what they fetched without
//!   another round trip
//!
//! # Example
//!
//! ```rust,no_run
//! use searchdish_api_client::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let client = ApiClient::new(config, Arc::new(MemoryTokenStore::new()))?;
//!
//!     let session = SessionService::new(client.clone());
//!     let user = session.login("awa@searchdish.sn", "secret").await?;
//!     println!("Hello {}", user.display_name());
//!
//!     let page = client.restaurant_dishes().paginate_by_city(1, 10, "Dakar").await?;
//!     println!("{} dishes served in Dakar", page.total);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod listing;
pub mod models;
pub mod payload;
pub mod session;
pub mod storage;
pub mod transport;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use session::{SessionError, SessionEvent, SessionService, SessionState};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::ApiClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{
        ContactApi, DishesApi, RestaurantDishesApi, RestaurantsApi, UsersApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::listing::{ListController, ListItem, ListView, PageRequest, PageSource};
    pub use crate::models::*;
    pub use crate::payload::{ImageUpload, Payload};
    pub use crate::session::{SessionError, SessionEvent, SessionService, SessionState};
    pub use crate::storage::{FileTokenStore, MemoryTokenStore, TokenStore};
}
