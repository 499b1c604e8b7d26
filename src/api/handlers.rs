use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::{FileCategory, SITE_SHORTCUTS, SearchFormState};
use crate::query_builder::synthesize_now;
use crate::search_client::{CseClient, classify};

use super::models::{FileTypeOption, OptionsResponse, QueryResponse, SearchResponse};

pub async fn query_handler(Json(form): Json<SearchFormState>) -> Json<QueryResponse> {
    Json(QueryResponse {
        query: synthesize_now(&form),
    })
}

pub async fn search_handler(
    State(client): State<Arc<CseClient>>,
    Json(form): Json<SearchFormState>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();
    let query = synthesize_now(&form);

    if query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }

    // Upstream failures are part of the outcome, not an error of this endpoint
    let outcome = classify(client.search(&query).await);

    Ok(Json(SearchResponse {
        query,
        outcome,
        processing_time_ms: start.elapsed().as_millis(),
    }))
}

pub async fn options_handler() -> Json<OptionsResponse> {
    let file_types = FileCategory::ALL
        .iter()
        .map(|category| FileTypeOption {
            id: category.id(),
            label: category.label(),
            extensions: category.extensions(),
            placeholder: category.placeholder(),
        })
        .collect();

    Json(OptionsResponse {
        file_types,
        sites: SITE_SHORTCUTS.to_vec(),
    })
}
