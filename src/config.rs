use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OpenAI API key for the structured-generation service
    pub openai_api_key: String,

    /// Base URL of the generation service (OpenAI-compatible)
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Model used for suggestion generation
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Interpreter used to run the scraper script
    #[serde(default = "default_scraper_command")]
    pub scraper_command: String,

    /// Path to the per-product scraper script
    #[serde(default = "default_scraper_script")]
    pub scraper_script: String,

    /// Seconds to wait for a single scraper invocation before giving up
    #[serde(default = "default_scraper_timeout_secs")]
    pub scraper_timeout_secs: u64,

    /// Products collected per gift idea before the loop stops
    #[serde(default = "default_target_products")]
    pub target_products: usize,

    /// Failed lookup attempts tolerated per gift idea
    #[serde(default = "default_fetch_retry_budget")]
    pub fetch_retry_budget: u32,

    /// Pause between lookup attempts, in milliseconds
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// Gift ideas enriched concurrently
    #[serde(default = "default_enrichment_concurrency")]
    pub enrichment_concurrency: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-2024-08-06".to_string()
}

fn default_scraper_command() -> String {
    "python".to_string()
}

fn default_scraper_script() -> String {
    "amazon_scraper.py".to_string()
}

fn default_scraper_timeout_secs() -> u64 {
    30
}

fn default_target_products() -> usize {
    5
}

fn default_fetch_retry_budget() -> u32 {
    3
}

fn default_fetch_delay_ms() -> u64 {
    1000
}

fn default_enrichment_concurrency() -> usize {
    4
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
