/// Suggestion generation via an external structured-generation service
///
/// One request per pipeline run against an OpenAI-compatible chat completions
/// endpoint with a strict JSON-schema response format. The schema is the
/// contract: a response that does not deserialize as a `SuggestionTree` is a
/// fatal error for the run, with no partial acceptance.
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{SurveyResponse, SuggestionTree},
};

const SYSTEM_INSTRUCTION: &str = "Based on the provided survey responses, generate 5 gift \
suggestions for each of 5 categories relevant to the preferences. Focus on specific, searchable \
product names that are likely to be found on Amazon India. Write the description and categories \
in third person, focusing on the preferences and interests mentioned, without specifying the \
recipient directly or using demographic details. Leave every products array empty.";

/// Trait for suggestion generation backends
///
/// An explicitly constructed, injected handle rather than a global client,
/// so the pipeline can run against a test double.
#[async_trait::async_trait]
pub trait SuggestionClient: Send + Sync {
    /// Generate an unenriched suggestion tree for a survey
    async fn generate(&self, survey: &SurveyResponse) -> AppResult<SuggestionTree>;
}

#[derive(Clone)]
pub struct OpenAiSuggestionClient {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl OpenAiSuggestionClient {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// JSON schema for the structured response, mirroring `SuggestionTree`.
    ///
    /// The products array is present in the schema but the system instruction
    /// tells the model to leave it empty; enrichment fills it with real data.
    fn response_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "description": { "type": "string" },
                "categories": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "categoryName": { "type": "string" },
                            "gifts": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "giftName": { "type": "string" },
                                        "products": {
                                            "type": "array",
                                            "items": {
                                                "type": "object",
                                                "properties": {
                                                    "title": { "type": ["string", "null"] },
                                                    "price": { "type": "string" },
                                                    "rating": { "type": "string" },
                                                    "image_url": { "type": "string" },
                                                    "product_link": { "type": "string" }
                                                },
                                                "required": ["title", "price", "rating", "image_url", "product_link"],
                                                "additionalProperties": false
                                            }
                                        }
                                    },
                                    "required": ["giftName", "products"],
                                    "additionalProperties": false
                                }
                            }
                        },
                        "required": ["categoryName", "gifts"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["description", "categories"],
            "additionalProperties": false
        })
    }
}

#[async_trait::async_trait]
impl SuggestionClient for OpenAiSuggestionClient {
    async fn generate(&self, survey: &SurveyResponse) -> AppResult<SuggestionTree> {
        let url = format!("{}/chat/completions", self.api_url.trim_end_matches('/'));

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                {
                    "role": "user",
                    "content": format!("Survey responses: {}", serde_json::to_string(survey)?)
                }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "giftSuggestions",
                    "strict": true,
                    "schema": Self::response_schema()
                }
            }
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Generation service returned status {}: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response.json().await?;

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| {
                AppError::Generation("Generation response carried no message content".to_string())
            })?;

        let tree: SuggestionTree = serde_json::from_str(content).map_err(|e| {
            AppError::Generation(format!(
                "Generation response did not match the suggestion schema: {}",
                e
            ))
        })?;

        tracing::info!(
            categories = tree.categories.len(),
            gifts = tree.gift_count(),
            "Generated suggestion tree"
        );

        Ok(tree)
    }
}
