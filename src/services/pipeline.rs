/// End-to-end suggestion pipeline
///
/// Drives a run through its stages: derive filters once, generate the
/// suggestion tree once, enrich every gift idea, serialize. A run never
/// raises past the pipeline edge: it produces either the enriched tree or a
/// uniform `{"error": message}` envelope.
use std::sync::Arc;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::{
    error::AppResult,
    models::{SurveyResponse, SuggestionTree},
    services::{
        enrichment::{Enricher, EnrichmentPolicy},
        filters,
        generation::SuggestionClient,
        providers::ProductProvider,
    },
};

/// Pipeline stages, recorded in logs as a run advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Generating,
    Enriching,
    Done,
    Failed,
}

#[derive(Clone)]
pub struct SuggestionPipeline {
    generator: Arc<dyn SuggestionClient>,
    enricher: Enricher,
}

impl SuggestionPipeline {
    pub fn new(
        generator: Arc<dyn SuggestionClient>,
        provider: Arc<dyn ProductProvider>,
        policy: EnrichmentPolicy,
        concurrency: usize,
    ) -> Self {
        Self {
            generator,
            enricher: Enricher::new(provider, policy, concurrency),
        }
    }

    /// Runs the pipeline and returns the enriched tree.
    ///
    /// Fatal failures (generation, schema violation, cancellation) propagate;
    /// lookup misses never do, they only shrink individual product lists.
    pub async fn run(
        &self,
        survey: &SurveyResponse,
        cancel: &CancellationToken,
    ) -> AppResult<SuggestionTree> {
        let filters = filters::derive_filters(survey);
        tracing::info!(
            min_price = filters.min_price,
            max_price = filters.max_price,
            min_rating = filters.min_rating,
            stage = ?PipelineStage::Generating,
            "Starting suggestion pipeline"
        );

        let mut tree = self.generator.generate(survey).await.inspect_err(|e| {
            tracing::error!(stage = ?PipelineStage::Failed, error = %e, "Suggestion generation failed");
        })?;

        tracing::info!(
            stage = ?PipelineStage::Enriching,
            categories = tree.categories.len(),
            gifts = tree.gift_count(),
            "Enriching gift ideas"
        );

        self.enricher
            .enrich_tree(&mut tree, &filters, cancel)
            .await
            .inspect_err(|e| {
                tracing::error!(stage = ?PipelineStage::Failed, error = %e, "Enrichment aborted");
            })?;

        tracing::info!(stage = ?PipelineStage::Done, "Pipeline complete");
        Ok(tree)
    }

    /// Runs the pipeline to its externally observable payload.
    ///
    /// Every failure is caught here and folded into the error envelope; the
    /// caller only ever sees a structured success or a structured failure.
    /// Source behavior is kept: a late failure discards partial enrichment.
    pub async fn run_serialized(
        &self,
        survey: &SurveyResponse,
        cancel: &CancellationToken,
    ) -> Value {
        match self.run(survey, cancel).await {
            Ok(tree) => serde_json::to_value(&tree)
                .unwrap_or_else(|e| json!({ "error": format!("Failed to serialize suggestions: {e}") })),
            Err(e) => json!({ "error": e.to_string() }),
        }
    }
}
