//! Domain entities
//!
//! Per-request models of the upstream feed and its rendered items.
//! Nothing here is persisted; every value lives for one request.

pub mod feed;

pub use feed::{Feed, Item, ItemFragment, ResolvedItem};
