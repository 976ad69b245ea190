//! Feed source port trait
//!
//! Fetches and parses a syndication feed into the domain object model.

use async_trait::async_trait;

use crate::domain::entities::Feed;
use crate::error::FeedSourceError;

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the feed at `url` and parse it
    async fn fetch(&self, url: &str) -> Result<Feed, FeedSourceError>;
}
