/// Product lookup provider abstraction
///
/// This module provides a pluggable architecture for product lookup backends
/// (external scraper process, HTTP service, test stubs). The enrichment loop
/// only ever sees the trait, so the core runs without spawning anything in
/// tests.
use crate::{
    error::AppResult,
    models::{FilterSpec, ProductRecord},
};

pub mod scraper;

pub use scraper::ScraperProvider;

/// Trait for product lookup backends
///
/// A single invocation is an at-most-one-attempt primitive: `Ok(None)` means
/// "no result this time" and is the expected shape of a transient miss. The
/// retry policy lives in the enrichment loop, never here.
#[async_trait::async_trait]
pub trait ProductProvider: Send + Sync {
    /// Look up one marketplace listing for a product name under the given filters
    ///
    /// Returns `Ok(None)` for every normal absence of data; `Err` is reserved
    /// for faults outside the lookup itself (and is still absorbed upstream).
    async fn lookup_product(
        &self,
        name: &str,
        filters: &FilterSpec,
    ) -> AppResult<Option<ProductRecord>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
