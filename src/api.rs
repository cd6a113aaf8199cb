//! JSON API for hiscore lookups, mounted under `/api`.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    client::{HiscoreComparison, HiscoreEntry},
    error::AppError,
    query::DEFAULT_RANK,
    state::AppState,
};

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/hiscores/rank/{skill}?rank=N`
pub async fn rank_handler(
    State(state): State<AppState>,
    Path(skill): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<HiscoreEntry>, AppError> {
    let rank = match params.get("rank") {
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|rank| *rank >= 1)
            .ok_or_else(|| AppError::BadRequest(format!("invalid rank: {raw}")))?,
        None => DEFAULT_RANK,
    };

    let entry = state.client.hiscore_rank(&skill, rank).await?;
    Ok(Json(entry))
}

/// `GET /api/hiscores/player/{name}`
pub async fn player_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<HiscoreEntry>>, AppError> {
    let entries = state.client.hiscore_player(&name).await?;
    Ok(Json(entries))
}

/// `GET /api/hiscores/compare?name=A&opponent=B`
pub async fn compare_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<HiscoreComparison>, AppError> {
    let name = require(&params, "name")?;
    let opponent = require(&params, "opponent")?;

    let comparison = state.client.hiscore_compare(name, opponent).await?;
    Ok(Json(comparison))
}

fn require<'a>(
    params: &'a HashMap<String, String>,
    key: &str,
) -> Result<&'a str, AppError> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("missing query parameter: {key}")))
}
