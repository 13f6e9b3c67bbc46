//! Configuration loading and schema definitions
//!
//! The configuration file is optional; every value has a default and the
//! API client applies environment overrides on top of it.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_CANDIDATES};
pub use schema::*;
