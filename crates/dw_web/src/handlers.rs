use axum::{
    extract::{Path, Query, State},
    Json,
};
use dw_core::{ArticleRecord, ArticleStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{ApiError, AppState};

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

pub async fn list_articles(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ArticleRecord>> {
    Ok(Json(state.storage.list().await?))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<ArticleRecord> {
    Ok(Json(state.storage.get(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Comma separated keywords.
    #[serde(default)]
    pub q: String,
}

pub async fn search_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<ArticleRecord>> {
    let keywords: Vec<String> = params.q.split(',').map(str::to_string).collect();
    Ok(Json(state.storage.search(&keywords).await?))
}

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FetchResult {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn fetch_articles(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FetchRequest>,
) -> ApiResult<Vec<FetchResult>> {
    let outcomes = state.manager.fetch_all(&request.urls).await?;
    let results = outcomes
        .into_iter()
        .map(|outcome| match outcome.result {
            Ok((record, status)) => FetchResult {
                url: outcome.url,
                id: Some(record.id().to_string()),
                status: Some(status),
                error: None,
            },
            Err(e) => FetchResult {
                url: outcome.url,
                id: None,
                status: None,
                error: Some(e.to_string()),
            },
        })
        .collect();
    Ok(Json(results))
}
