//! Axum route handlers for occupation search and detail lookup.

use axum::{
    extract::{Query, State},
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::occupation::{Occupation, OccupationDetail};
use crate::state::AppState;

static RE_OCCUPATION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}-\d{4}\.\d{2}$").unwrap());

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub occupations: Vec<Occupation>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsParams {
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub details: OccupationDetail,
}

/// GET /search?q=<keyword>
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let keyword = params.q.as_deref().map(str::trim).unwrap_or_default();
    if keyword.is_empty() {
        return Err(AppError::Validation("Missing search query".to_string()));
    }

    let occupations = state
        .directory
        .search(keyword)
        .await
        .map_err(|source| AppError::Directory {
            message: "Failed to search occupations",
            source,
        })?;

    info!("Search {keyword:?} returned {} occupations", occupations.len());

    Ok(Json(SearchResponse { occupations }))
}

/// GET /details?code=<code>
pub async fn handle_details(
    State(state): State<AppState>,
    Query(params): Query<DetailsParams>,
) -> Result<Json<DetailsResponse>, AppError> {
    let code = params.code.as_deref().map(str::trim).unwrap_or_default();
    if code.is_empty() {
        return Err(AppError::Validation("Missing occupation code".to_string()));
    }
    if !RE_OCCUPATION_CODE.is_match(code) {
        return Err(AppError::Validation("Invalid occupation code".to_string()));
    }

    let details = state
        .directory
        .details(code)
        .await
        .map_err(|source| AppError::Directory {
            message: "Failed to fetch occupation details",
            source,
        })?;

    Ok(Json(DetailsResponse { details }))
}
