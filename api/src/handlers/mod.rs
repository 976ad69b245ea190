//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod site;

pub use site::{get_site_feed, missing_site};
