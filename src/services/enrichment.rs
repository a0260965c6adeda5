/// Gift-idea enrichment
///
/// Attaches real marketplace listings to generated gift ideas. Per gift idea
/// the loop is bounded two ways: it stops once the target product count is
/// collected or once the miss budget is spent, and it paces every attempt so
/// the external data source is not hammered. Persistent lookup failure is
/// expected and absorbed; the pipeline keeps making progress regardless.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{AppError, AppResult},
    models::{FilterSpec, ProductRecord, SuggestionTree},
    services::providers::ProductProvider,
};

/// Bounds for a single gift idea's enrichment
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentPolicy {
    /// Products collected before the loop stops
    pub target_count: usize,
    /// Consecutive-run misses tolerated before giving up
    pub retry_budget: u32,
    /// Pause after every attempt, hit or miss
    pub pacing: Duration,
}

impl Default for EnrichmentPolicy {
    fn default() -> Self {
        Self {
            target_count: 5,
            retry_budget: 3,
            pacing: Duration::from_millis(1000),
        }
    }
}

#[derive(Clone)]
pub struct Enricher {
    provider: Arc<dyn ProductProvider>,
    policy: EnrichmentPolicy,
    concurrency: usize,
}

impl Enricher {
    pub fn new(provider: Arc<dyn ProductProvider>, policy: EnrichmentPolicy, concurrency: usize) -> Self {
        Self {
            provider,
            policy,
            concurrency: concurrency.max(1),
        }
    }

    /// Collects up to `target_count` listings for one gift idea.
    ///
    /// A hit appends without touching the miss counter; a miss (or a provider
    /// fault) spends one unit of the retry budget. Never errs, never loops
    /// past its bounds.
    pub async fn products_for_gift(
        &self,
        gift_name: &str,
        filters: &FilterSpec,
    ) -> Vec<ProductRecord> {
        let mut products = Vec::new();
        let mut misses = 0u32;

        while products.len() < self.policy.target_count && misses < self.policy.retry_budget {
            match self.provider.lookup_product(gift_name, filters).await {
                Ok(Some(record)) => products.push(record),
                Ok(None) => misses += 1,
                Err(e) => {
                    tracing::warn!(
                        gift = %gift_name,
                        provider = self.provider.name(),
                        error = %e,
                        "Product lookup failed"
                    );
                    misses += 1;
                }
            }

            // Pacing applies to every attempt regardless of outcome
            tokio::time::sleep(self.policy.pacing).await;
        }

        tracing::debug!(
            gift = %gift_name,
            collected = products.len(),
            misses,
            "Finished product collection"
        );

        products.truncate(self.policy.target_count);
        products
    }

    /// Enriches every gift idea in the tree, in place.
    ///
    /// Gift ideas have no data dependency on each other, so they are fanned
    /// out as independent tasks under a concurrency bound and joined before
    /// return. Each idea's products field is written exactly once, at its
    /// original (category, gift) position.
    pub async fn enrich_tree(
        &self,
        tree: &mut SuggestionTree,
        filters: &FilterSpec,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = Vec::new();

        for (category_idx, category) in tree.categories.iter().enumerate() {
            for (gift_idx, gift) in category.gifts.iter().enumerate() {
                let enricher = self.clone();
                let gift_name = gift.gift_name.clone();
                let filters = *filters;
                let semaphore = Arc::clone(&semaphore);
                let cancel = cancel.clone();

                let task = tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| AppError::Internal(e.to_string()))?;
                    if cancel.is_cancelled() {
                        return Err(AppError::Cancelled);
                    }
                    let products = tokio::select! {
                        products = enricher.products_for_gift(&gift_name, &filters) => products,
                        _ = cancel.cancelled() => return Err(AppError::Cancelled),
                    };
                    Ok::<_, AppError>((category_idx, gift_idx, products))
                });
                tasks.push(task);
            }
        }

        for task in tasks {
            match task.await {
                Ok(Ok((category_idx, gift_idx, products))) => {
                    tree.categories[category_idx].gifts[gift_idx].products = products;
                }
                Ok(Err(AppError::Cancelled)) => return Err(AppError::Cancelled),
                Ok(Err(e)) => return Err(e),
                Err(e) => return Err(AppError::Internal(e.to_string())),
            }
        }

        Ok(())
    }
}
