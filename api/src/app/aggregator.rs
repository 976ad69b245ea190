//! Concurrent aggregator
//!
//! Fans item enrichment out over tokio tasks and collects the fragments back
//! in upstream order.
//!
//! - At most `max_in_flight` resolutions run at once (semaphore)
//! - Results land in a slot addressed by the item's index, never by
//!   completion order
//! - Every task is joined before returning, even when one has already failed
//! - Any failure fails the whole aggregation; the reported failure is the
//!   first one in item order
//! - Dropping the aggregation future, or hitting the deadline, cancels the
//!   token handed to every resolver and aborts the remaining tasks

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::app::ItemEnricher;
use crate::domain::entities::{Item, ItemFragment};
use crate::domain::ports::LinkResolver;
use crate::error::{AggregateError, ResolveError};

type Slot = Option<Result<ItemFragment, ResolveError>>;

pub struct ConcurrentAggregator<LR: ?Sized> {
    enricher: ItemEnricher<LR>,
    max_in_flight: usize,
    deadline: Duration,
}

impl<LR> ConcurrentAggregator<LR>
where
    LR: LinkResolver + ?Sized + 'static,
{
    pub fn new(resolver: Arc<LR>, max_in_flight: usize, deadline: Duration) -> Self {
        Self {
            enricher: ItemEnricher::new(resolver),
            max_in_flight: max_in_flight.max(1),
            deadline,
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Enrich every item, returning fragments in input order or the first
    /// failure in input order
    pub async fn aggregate(&self, items: &[Item]) -> Result<Vec<ItemFragment>, AggregateError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        tokio::time::timeout(self.deadline, self.run(items))
            .await
            .map_err(|_| {
                tracing::warn!(
                    items = items.len(),
                    deadline = ?self.deadline,
                    "Link resolution deadline exceeded, cancelling"
                );
                AggregateError::DeadlineExceeded(self.deadline)
            })?
    }

    async fn run(&self, items: &[Item]) -> Result<Vec<ItemFragment>, AggregateError> {
        let cancel = CancellationToken::new();
        // Declared before `tasks` so the tasks are aborted first, then the
        // token fires for anything still holding it.
        let _cancel_on_drop = cancel.clone().drop_guard();
        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();

        for (index, item) in items.iter().cloned().enumerate() {
            let enricher = self.enricher.clone();
            let permits = Arc::clone(&permits);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => enricher.enrich(item, &cancel).await,
                    Err(_) => Err(ResolveError::Cancelled { url: item.link }),
                };
                (index, result)
            });
        }

        let mut slots: Vec<Slot> = std::iter::repeat_with(|| None).take(items.len()).collect();
        let mut join_failure = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => {
                    tracing::error!(error = %e, "Resolution task failed to complete");
                    join_failure.get_or_insert_with(|| e.to_string());
                }
            }
        }

        collect_in_order(slots, join_failure)
    }
}

fn collect_in_order(
    slots: Vec<Slot>,
    join_failure: Option<String>,
) -> Result<Vec<ItemFragment>, AggregateError> {
    let mut fragments = Vec::with_capacity(slots.len());
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(Ok(fragment)) => fragments.push(fragment),
            Some(Err(source)) => return Err(AggregateError::Item { index, source }),
            None => {
                return Err(AggregateError::Task {
                    index,
                    message: join_failure
                        .unwrap_or_else(|| "task produced no result".to_string()),
                })
            }
        }
    }
    Ok(fragments)
}
