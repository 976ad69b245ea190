//! Domain ports (traits)
//!
//! Port traits define interfaces that the pipeline requires.
//! Adapters provide concrete implementations of these traits.

pub mod feed_source;
pub mod link_resolver;

pub use feed_source::FeedSource;
pub use link_resolver::LinkResolver;
