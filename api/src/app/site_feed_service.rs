//! Site feed service
//!
//! Drives one request through the pipeline:
//! validate → fetch & parse → aggregate → serialize.
//! Stages are never retried; the first failure ends the request.

use std::sync::Arc;

use crate::app::{ConcurrentAggregator, SearchUrl};
use crate::config::Config;
use crate::domain::ports::{FeedSource, LinkResolver};
use crate::error::AppError;
use crate::feed::render_feed;

pub struct SiteFeedService<FS: ?Sized, LR: ?Sized> {
    feeds: Arc<FS>,
    aggregator: ConcurrentAggregator<LR>,
    search_url: SearchUrl,
}

impl<FS, LR> SiteFeedService<FS, LR>
where
    FS: FeedSource + ?Sized,
    LR: LinkResolver + ?Sized + 'static,
{
    pub fn new(feeds: Arc<FS>, aggregator: ConcurrentAggregator<LR>, search_url: SearchUrl) -> Self {
        Self {
            feeds,
            aggregator,
            search_url,
        }
    }

    pub fn from_config(feeds: Arc<FS>, resolver: Arc<LR>, config: &Config) -> Self {
        Self::new(
            feeds,
            ConcurrentAggregator::new(
                resolver,
                config.max_concurrent_resolutions,
                config.request_deadline,
            ),
            SearchUrl::from_config(config),
        )
    }

    /// Build the republished RSS document for `site`
    pub async fn render_site(&self, site: &str) -> Result<String, AppError> {
        let site = validate_site(site)?;

        let url = self.search_url.for_site(site);
        let feed = self.feeds.fetch(&url).await?;
        tracing::info!(site, items = feed.items.len(), "Resolving site feed");

        let fragments = self.aggregator.aggregate(&feed.items).await?;

        Ok(render_feed(site, &feed, &fragments))
    }
}

/// Rejects a blank site. A non-blank site is passed on unchanged.
fn validate_site(site: &str) -> Result<&str, AppError> {
    if site.trim().is_empty() {
        return Err(AppError::Validation("site is required".to_string()));
    }
    Ok(site)
}
