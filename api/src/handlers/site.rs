//! Site feed handlers
//!
//! `GET /site/{site}` republishes the upstream search feed for a site as RSS 2.0.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::feed::RSS_CONTENT_TYPE;
use crate::AppState;

/// GET /site/:site
pub async fn get_site_feed(
    State(state): State<AppState>,
    Path(site): Path<String>,
) -> Result<Response, AppError> {
    let document = state.site_feed_service.render_site(&site).await?;

    Ok(([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], document).into_response())
}

/// GET /site/
///
/// The path segment is empty, so there is nothing to look up.
pub async fn missing_site() -> AppError {
    AppError::Validation("site is required".to_string())
}
