use super::engine::DEFAULT_LIMIT;
use super::types::{AssistantReply, AssistantRequest, SearchResponse};
use crate::catalog::handlers::{ApiError, api_error};
use crate::catalog::state::CatalogState;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub module_id: Option<String>,
    pub limit: Option<usize>,
}

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(state): Extension<Arc<CatalogState>>,
) -> Json<SearchResponse> {
    let scope = params.module_id.filter(|m| !m.is_empty());
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    let live = state.read().await;
    let results: Vec<_> = live
        .search(&params.q, scope.as_deref(), limit)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        "Search {:?} (scope {:?}) returned {} results",
        params.q,
        scope,
        results.len()
    );

    Json(SearchResponse {
        query: params.q,
        scope,
        count: results.len(),
        results,
    })
}

pub async fn handle_assistant(
    Extension(state): Extension<Arc<CatalogState>>,
    Json(req): Json<AssistantRequest>,
) -> Result<Json<AssistantReply>, ApiError> {
    let live = state.read().await;
    let reply = live.suggest(&req.message);

    reply
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "message is required"))
}
