//! One module per page-level view

pub mod auth;
pub mod contact;
pub mod dishes;
pub mod explore;
pub mod menu;
pub mod restaurants;
