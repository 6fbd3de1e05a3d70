use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route("/process-chat", post(handlers::chat::process_chat))
        .route(
            "/preferences/{user_id}",
            get(handlers::preferences::get_preferences)
                .post(handlers::preferences::update_preferences),
        )
        .route(
            "/analyze-preferences",
            post(handlers::health::analyze_preferences),
        )
        .route("/history/{session_id}", get(handlers::history::get_history))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
