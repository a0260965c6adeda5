use serde::{Deserialize, Serialize};

mod survey;

pub use survey::SurveyResponse;

/// Numeric constraints applied to every product lookup for a run.
///
/// Serialized snake_case because the same JSON document is handed verbatim
/// to the scraper process as its filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub min_price: u32,
    pub max_price: u32,
    pub min_rating: f32,
}

/// One marketplace listing as emitted by the scraper.
///
/// Opaque beyond structural validity: price and rating stay display strings,
/// the core never parses them numerically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub title: Option<String>,
    pub price: String,
    pub rating: String,
    pub image_url: String,
    pub product_link: String,
}

/// A single generated gift idea, enriched in place with real listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GiftIdea {
    pub gift_name: String,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// A themed group of gift ideas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_name: String,
    pub gifts: Vec<GiftIdea>,
}

/// The categorized suggestion set produced by the generation service.
///
/// Created unenriched (every `products` empty), then populated exactly once
/// per gift idea by the enrichment pass. Lives for a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionTree {
    pub description: String,
    pub categories: Vec<Category>,
}

impl SuggestionTree {
    /// Total number of gift ideas across all categories
    pub fn gift_count(&self) -> usize {
        self.categories.iter().map(|c| c.gifts.len()).sum()
    }
}
