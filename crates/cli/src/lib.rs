//! Terminal helpers for the SearchDish command-line client
//!
//! Provides shared CLI functionality:
//! - Status messages and error reports
//! - Column-aligned tables and empty states
//! - Loading spinners

#![warn(missing_docs)]

pub mod output;
pub mod progress;
