//! Link resolver port trait
//!
//! Resolves an aggregator indirection URL to the destination article.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ResolveError;

#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Resolve `url` with a single fetch. Implementations must stop and
    /// return `ResolveError::Cancelled` once `cancel` fires, and must not retry.
    async fn resolve(&self, url: &str, cancel: &CancellationToken) -> Result<String, ResolveError>;
}
