//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They record every call so tests can verify behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::domain::entities::Feed;
use crate::domain::ports::{FeedSource, LinkResolver};
use crate::error::{FeedSourceError, ResolveError};

// ============================================================================
// Mock Link Resolver
// ============================================================================

#[derive(Debug, Clone)]
enum Outcome {
    Link(String),
    NoLink,
    Status(u16),
}

/// Resolver with per-URL outcomes and delays. Unknown URLs have no link.
#[derive(Default)]
pub struct MockLinkResolver {
    outcomes: HashMap<String, Outcome>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
    tokens: Mutex<Vec<CancellationToken>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

impl MockLinkResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, url: &str, link: &str) -> Self {
        self.outcomes
            .insert(url.to_string(), Outcome::Link(link.to_string()));
        self
    }

    pub fn with_no_link(mut self, url: &str) -> Self {
        self.outcomes.insert(url.to_string(), Outcome::NoLink);
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.outcomes.insert(url.to_string(), Outcome::Status(status));
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// URLs passed to `resolve`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Tokens received by `resolve`
    pub fn tokens(&self) -> Vec<CancellationToken> {
        self.tokens.lock().unwrap().clone()
    }

    /// Highest number of concurrent `resolve` calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Resolutions that ran to an outcome without being cancelled
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    fn outcome(&self, url: &str) -> Result<String, ResolveError> {
        match self.outcomes.get(url).cloned().unwrap_or(Outcome::NoLink) {
            Outcome::Link(link) => Ok(link),
            Outcome::NoLink => Err(ResolveError::NoLinkFound {
                url: url.to_string(),
            }),
            Outcome::Status(status) => Err(ResolveError::Status {
                url: url.to_string(),
                status,
            }),
        }
    }
}

#[async_trait]
impl LinkResolver for MockLinkResolver {
    async fn resolve(&self, url: &str, cancel: &CancellationToken) -> Result<String, ResolveError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.tokens.lock().unwrap().push(cancel.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(url).copied().unwrap_or_default();
        let finished = tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if !finished {
            return Err(ResolveError::Cancelled {
                url: url.to_string(),
            });
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.outcome(url)
    }
}

// ============================================================================
// Mock Feed Source
// ============================================================================

/// Feed source returning a fixed feed, or a fixed upstream status error
#[derive(Default)]
pub struct MockFeedSource {
    feed: Feed,
    failure_status: Option<u16>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, feed: Feed) -> Self {
        self.feed = feed;
        self
    }

    pub fn failing_with_status(mut self, status: u16) -> Self {
        self.failure_status = Some(status);
        self
    }

    /// URLs passed to `fetch`, in call order
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch(&self, url: &str) -> Result<Feed, FeedSourceError> {
        self.requested.lock().unwrap().push(url.to_string());

        match self.failure_status {
            Some(status) => Err(FeedSourceError::Status {
                url: url.to_string(),
                status,
            }),
            None => Ok(self.feed.clone()),
        }
    }
}
