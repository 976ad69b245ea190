//! Application layer
//!
//! Contains the request pipeline and its concurrency.
//! Services coordinate between domain entities, ports, and the renderer.

pub mod aggregator;
pub mod item_enricher;
pub mod search_url;
pub mod site_feed_service;

pub use aggregator::ConcurrentAggregator;
pub use item_enricher::ItemEnricher;
pub use search_url::SearchUrl;
pub use site_feed_service::SiteFeedService;
