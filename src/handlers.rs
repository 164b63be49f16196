use crate::{
    AppState,
    categories::CategoryFilter,
    errors::AppError,
    models::{Fact, FactDraft, VoteUpdate},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

/// GET /facts?category= — the filtered, text-ordered read. An absent or
/// "all" category returns everything.
pub async fn list_facts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = params
        .category
        .as_deref()
        .map(CategoryFilter::parse)
        .unwrap_or_default();
    tracing::debug!(category = %filter.label(), "Listing facts via handler");
    let facts = state.repo.list(&filter).await?;
    Ok(Json(facts))
}

/// POST /facts — validates the draft and persists it. The full row, with
/// backend-assigned id, zeroed votes, and creation year, comes back.
pub async fn create_fact(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<FactDraft>,
) -> Result<impl IntoResponse, AppError> {
    draft.validate()?;
    let fact = state.repo.insert(&draft).await?;
    tracing::info!(fact_id = fact.id, category = %fact.category, "Fact created via handler");
    Ok((StatusCode::CREATED, Json(fact)))
}

/// PATCH /facts/{id} — sets exactly one vote field to the given value and
/// returns the updated row.
pub async fn vote_fact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<VoteUpdate>,
) -> Result<Json<Fact>, AppError> {
    tracing::debug!(fact_id = id, field = update.field.field_name(), value = update.value, "Recording vote via handler");
    let fact = state.repo.set_vote(id, update.field, update.value).await?;
    Ok(Json(fact))
}
