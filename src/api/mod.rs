use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::search_client::CseClient;

pub mod handlers;
pub mod models;

pub fn create_router(client: Arc<CseClient>) -> Router {
    // Any browser front-end may drive the form
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/query", post(handlers::query_handler))
        .route("/api/search", post(handlers::search_handler))
        .route("/api/options", get(handlers::options_handler))
        .with_state(client)
        .layer(cors)
}
