//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{Feed, Item};

/// Create a test item whose fields all derive from `n`
pub fn test_item(n: usize) -> Item {
    Item {
        title: format!("Story {}", n),
        description: format!("Summary of story {}", n),
        link: format!("https://news.google.com/rss/articles/item-{}", n),
        guid: format!("guid-{}", n),
        published: "Mon, 01 Jan 2024 00:00:00 +0000".to_string(),
    }
}

/// Create `count` test items numbered from zero
pub fn test_items(count: usize) -> Vec<Item> {
    (0..count).map(test_item).collect()
}

/// Create a test feed with every channel field set and `count` items
pub fn test_feed(count: usize) -> Feed {
    Feed {
        title: "\"site:example.com\" - Google News".to_string(),
        description: "Google News".to_string(),
        link: "https://news.google.com/search?q=site:example.com".to_string(),
        feed_link: "https://news.google.com/rss/search?q=site:example.com".to_string(),
        updated: "Mon, 01 Jan 2024 12:00:00 +0000".to_string(),
        published: "Mon, 01 Jan 2024 11:00:00 +0000".to_string(),
        language: "en-US".to_string(),
        generator: "NFE/5.0".to_string(),
        items: test_items(count),
    }
}
