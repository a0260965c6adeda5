pub mod enrichment;
pub mod filters;
pub mod generation;
pub mod pipeline;
pub mod providers;

pub use enrichment::{Enricher, EnrichmentPolicy};
pub use pipeline::SuggestionPipeline;
