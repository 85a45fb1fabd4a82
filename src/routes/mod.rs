use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::request_id, services::providers::MovieProvider};

pub mod movies;

/// Shared application state: the one provider this deployment forwards to
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MovieProvider>,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_id::make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(movies::search))
        // a bare detail path never reaches the provider
        .route("/movie", get(movies::details_missing_id))
        .route("/movie/", get(movies::details_missing_id))
        .route("/movie/:id", get(movies::details))
        .route("/trending", get(movies::trending))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
