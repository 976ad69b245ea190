//! Upstream search feed adapter
//!
//! Fetches an RSS/Atom document and maps it onto the domain feed model.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::model;
use reqwest::Client;

use super::client::read_capped;
use crate::domain::entities::{Feed, Item};
use crate::domain::ports::FeedSource;
use crate::error::FeedSourceError;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

pub struct HttpFeedSource {
    http: Client,
    timeout: Duration,
}

impl HttpFeedSource {
    pub fn new(http: Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Feed, FeedSourceError> {
        let request_error = |source| FeedSourceError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedSourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = read_capped(response, MAX_FEED_SIZE)
            .await
            .map_err(request_error)?
            .ok_or_else(|| FeedSourceError::Parse {
                url: url.to_string(),
                message: format!("feed exceeds {} bytes", MAX_FEED_SIZE),
            })?;

        let parsed = parser()
            .parse(body.as_slice())
            .map_err(|e| FeedSourceError::Parse {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let feed = map_feed(parsed);
        tracing::debug!(url, items = feed.items.len(), "Fetched upstream feed");
        Ok(feed)
    }
}

/// Items without a `<guid>` keep an empty id instead of a synthesized one
fn parser() -> feed_rs::parser::Parser {
    feed_rs::parser::Builder::new()
        .id_generator(|_, _, _| String::new())
        .build()
}

fn map_feed(feed: model::Feed) -> Feed {
    Feed {
        title: text(feed.title),
        description: text(feed.description),
        link: primary_link(&feed.links),
        feed_link: self_link(&feed.links),
        updated: timestamp(feed.updated),
        published: timestamp(feed.published),
        language: feed.language.unwrap_or_default(),
        generator: feed.generator.map(|g| g.content).unwrap_or_default(),
        items: feed.entries.into_iter().map(map_entry).collect(),
    }
}

fn map_entry(entry: model::Entry) -> Item {
    let description = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_default();

    Item {
        title: text(entry.title),
        description,
        link: primary_link(&entry.links),
        guid: entry.id,
        published: timestamp(entry.published.or(entry.updated)),
    }
}

fn text(value: Option<model::Text>) -> String {
    value.map(|t| t.content).unwrap_or_default()
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|dt| dt.to_rfc2822()).unwrap_or_default()
}

fn primary_link(links: &[model::Link]) -> String {
    links
        .iter()
        .find(|l| l.rel.as_deref() != Some("self"))
        .map(|l| l.href.clone())
        .unwrap_or_default()
}

fn self_link(links: &[model::Link]) -> String {
    links
        .iter()
        .find(|l| l.rel.as_deref() == Some("self"))
        .map(|l| l.href.clone())
        .unwrap_or_default()
}
