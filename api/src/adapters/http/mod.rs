//! HTTP adapter
//!
//! Upstream search feed and link resolution over one shared reqwest client.

pub mod client;
pub mod feed_source;
pub mod link_resolver;

pub use client::build_http_client;
pub use feed_source::HttpFeedSource;
pub use link_resolver::HttpLinkResolver;
