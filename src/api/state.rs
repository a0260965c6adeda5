use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    services::{
        generation::{OpenAiSuggestionClient, SuggestionClient},
        providers::{ProductProvider, ScraperProvider},
        EnrichmentPolicy, SuggestionPipeline,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: SuggestionPipeline,
}

impl AppState {
    /// Wires the production backends from configuration
    pub fn new(config: Config) -> Self {
        let generator: Arc<dyn SuggestionClient> = Arc::new(OpenAiSuggestionClient::new(
            config.openai_api_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        ));
        let provider: Arc<dyn ProductProvider> = Arc::new(ScraperProvider::new(
            config.scraper_command.clone(),
            config.scraper_script.clone(),
            Duration::from_secs(config.scraper_timeout_secs),
        ));
        Self::with_backends(config, generator, provider)
    }

    /// Builds state around explicit backend handles (test doubles included)
    pub fn with_backends(
        config: Config,
        generator: Arc<dyn SuggestionClient>,
        provider: Arc<dyn ProductProvider>,
    ) -> Self {
        let policy = EnrichmentPolicy {
            target_count: config.target_products,
            retry_budget: config.fetch_retry_budget,
            pacing: Duration::from_millis(config.fetch_delay_ms),
        };
        let pipeline = SuggestionPipeline::new(
            generator,
            provider,
            policy,
            config.enrichment_concurrency,
        );
        Self { config, pipeline }
    }
}
