//! Item enricher
//!
//! Resolves one item's indirection link and renders the item as a
//! self-contained `<item>` fragment.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::entities::{Item, ItemFragment, ResolvedItem};
use crate::domain::ports::LinkResolver;
use crate::error::ResolveError;
use crate::feed::render_item;

pub struct ItemEnricher<LR: ?Sized> {
    resolver: Arc<LR>,
}

impl<LR: ?Sized> Clone for ItemEnricher<LR> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<LR> ItemEnricher<LR>
where
    LR: LinkResolver + ?Sized,
{
    pub fn new(resolver: Arc<LR>) -> Self {
        Self { resolver }
    }

    /// Resolve and render `item`. Resolver errors are returned unchanged.
    pub async fn enrich(
        &self,
        item: Item,
        cancel: &CancellationToken,
    ) -> Result<ItemFragment, ResolveError> {
        render_item(self.resolve(item, cancel).await)
    }

    pub async fn resolve(&self, item: Item, cancel: &CancellationToken) -> ResolvedItem {
        let link = self.resolver.resolve(&item.link, cancel).await;
        ResolvedItem::new(item, link)
    }
}
