use axum::middleware as axum_middleware;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use giftscout_api::api::{create_router, AppState};
use giftscout_api::config::Config;
use giftscout_api::middleware::request_id::{make_span_with_request_id, request_id_middleware};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Failed to load configuration");
    let addr = format!("{}:{}", config.host, config.port);

    let state = AppState::new(config);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
