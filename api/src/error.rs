//! Unified error types for the SiteFeed API
//!
//! This module defines error types for each layer:
//! - `FeedSourceError`: upstream search feed fetch/parse errors
//! - `ResolveError`: single link resolution errors
//! - `AggregateError`: request-level failure of the resolution fan-out
//! - `AppError`: Application layer errors (mapped to HTTP responses)

use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Upstream search feed errors
#[derive(Debug, Error)]
pub enum FeedSourceError {
    #[error("Feed request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Feed request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Feed from {url} could not be parsed: {message}")]
    Parse { url: String, message: String },
}

/// Link resolution errors for a single indirection URL
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetching {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("No link found in {url}")]
    NoLinkFound { url: String },

    #[error("Response from {url} exceeded {limit} bytes")]
    BodyTooLarge { url: String, limit: usize },

    #[error("Resolution of {url} was cancelled")]
    Cancelled { url: String },
}

/// Failure of a whole resolution fan-out
#[derive(Debug, Error)]
pub enum AggregateError {
    /// First failing item, in original item order
    #[error("Item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: ResolveError,
    },

    #[error("Resolution task for item {index} did not complete: {message}")]
    Task { index: usize, message: String },

    #[error("Link resolution exceeded the {0:?} deadline")]
    DeadlineExceeded(Duration),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UpstreamFeed(#[from] FeedSourceError),

    #[error("{0}")]
    Resolution(AggregateError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<AggregateError> for AppError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::Task { .. } => AppError::Internal(err.to_string()),
            other => AppError::Resolution(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamFeed(_) | AppError::Resolution(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Validation(msg) => tracing::debug!("Rejected request: {}", msg),
            AppError::UpstreamFeed(e) => tracing::error!("Upstream feed error: {}", e),
            AppError::Resolution(e) => tracing::error!("Link resolution error: {}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
