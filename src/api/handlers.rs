use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use super::AppState;
use crate::models::SurveyResponse;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Generates enriched gift suggestions for a survey.
///
/// The response body is always one of the two pipeline payload shapes: the
/// enriched suggestion tree, or `{"error": message}` produced by the
/// orchestrator boundary. Client disconnects cancel in-flight enrichment
/// through the request-scoped token.
pub async fn generate_suggestions(
    State(state): State<AppState>,
    Json(survey): Json<SurveyResponse>,
) -> Json<Value> {
    // If the client disconnects, axum drops this future; the guard then
    // cancels the token so no scraper handles outlive the request.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let payload = state.pipeline.run_serialized(&survey, &cancel).await;

    if let Some(error) = payload.get("error").and_then(Value::as_str) {
        tracing::warn!(error, "Suggestion run returned the error envelope");
    }

    Json(payload)
}
