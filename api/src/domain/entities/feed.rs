//! Feed domain entities
//!
//! The object model produced by the feed source. Absent values are empty
//! strings so the serializer can omit them uniformly.

use crate::error::ResolveError;

/// A parsed upstream feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub link: String,
    pub feed_link: String,
    /// RFC 2822 timestamp of the last update
    pub updated: String,
    /// RFC 2822 publication timestamp
    pub published: String,
    pub language: String,
    pub generator: String,
    pub items: Vec<Item>,
}

/// One entry of an upstream feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub description: String,
    /// Indirection URL pointing at the aggregator, not the article
    pub link: String,
    pub guid: String,
    pub published: String,
}

/// An item paired with the outcome of resolving its link
#[derive(Debug)]
pub struct ResolvedItem {
    pub item: Item,
    pub link: Result<String, ResolveError>,
}

impl ResolvedItem {
    pub fn new(item: Item, link: Result<String, ResolveError>) -> Self {
        Self { item, link }
    }
}

/// A serialized `<item>` element, ready to be spliced into a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFragment(String);

impl ItemFragment {
    pub(crate) fn new(xml: String) -> Self {
        Self(xml)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
