//! SiteFeed API Server
//!
//! Republishes a site's Google News search feed as RSS 2.0, with every item
//! pointing at the real article instead of the aggregator's redirect page.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{build_http_client, HttpFeedSource, HttpLinkResolver};
use app::SiteFeedService;
use config::Config;
use domain::ports::{FeedSource, LinkResolver};

pub type DynSiteFeedService = SiteFeedService<dyn FeedSource, dyn LinkResolver>;

/// Application state shared across all handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub site_feed_service: Arc<DynSiteFeedService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Site feeds
        .route("/site/", get(handlers::missing_site))
        .route("/site/:site", get(handlers::get_site_feed))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sitefeed_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SiteFeed API...");

    // Load configuration
    let config = Config::from_env();
    tracing::info!(
        upstream = %config.search_base_url,
        max_concurrent_resolutions = config.max_concurrent_resolutions,
        "Configuration loaded"
    );

    // One outbound client for the whole process
    let http = build_http_client(&config).context("Failed to build HTTP client")?;

    // Create adapters
    let feed_source: Arc<dyn FeedSource> =
        Arc::new(HttpFeedSource::new(http.clone(), config.feed_timeout));
    let link_resolver: Arc<dyn LinkResolver> =
        Arc::new(HttpLinkResolver::new(http, config.resolve_timeout));

    // Create application services
    let site_feed_service = Arc::new(SiteFeedService::from_config(
        feed_source,
        link_resolver,
        &config,
    ));

    let app = router(AppState { site_feed_service });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
