//! Server-rendered pages. Every hiscores page carries the search controls,
//! pre-filled from the current URL so a revisited search shows its values.

use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use tracing::debug;

use crate::{
    client::{HiscoreEntry, SkillComparison},
    error::PageError,
    query::SearchQuery,
    state::AppState,
};

/// Where the rank form submits: rank lookups stay within the skill the
/// visitor is currently viewing.
pub fn rank_search_action(skill: &str) -> String {
    format!("/hiscores/skill/{skill}")
}

#[derive(Template)]
#[template(path = "hiscores.html")]
struct HiscoresTemplate {
    heading: String,
    q: SearchQuery,
    rank_action: String,
    entries: Vec<HiscoreEntry>,
    comparison: Vec<SkillComparison>,
    error: String,
}

impl HiscoresTemplate {
    fn new(heading: impl Into<String>, q: SearchQuery) -> Self {
        Self {
            heading: heading.into(),
            rank_action: rank_search_action(&q.skill),
            q,
            entries: Vec::new(),
            comparison: Vec::new(),
            error: String::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

fn skill_heading(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        Some(first) => format!("{}{} Hiscores", first.to_uppercase(), chars.as_str()),
        None => "Hiscores".to_string(),
    }
}

/// `GET /hiscores` — search page; runs a name or compare lookup when the
/// URL carries one.
pub async fn hiscores_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let q = SearchQuery::from_params(&params);
    if state.dev {
        debug!(name = %q.name, opponent = %q.opponent, "rendering hiscores page");
    }

    let mut page = HiscoresTemplate::new("Hiscores", q.clone());

    if !q.name.is_empty() && !q.opponent.is_empty() {
        match state.client.hiscore_compare(&q.name, &q.opponent).await {
            Ok(comparison) => page.comparison = comparison.entries,
            Err(err) => page.error = lookup_error(&q, err),
        }
    } else if !q.name.is_empty() {
        match state.client.hiscore_player(&q.name).await {
            Ok(entries) => page.entries = entries,
            Err(err) => page.error = lookup_error(&q, err),
        }
    }

    Ok(Html(page.render()?))
}

/// `GET /hiscores/{skill}` — the search page scoped to one skill; the rank
/// form targets that skill.
pub async fn skill_page(
    State(state): State<AppState>,
    Path(skill): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let q = SearchQuery::from_path_skill(&skill, &params);
    if state.dev {
        debug!(skill = %q.skill, "rendering skill page");
    }

    let page = HiscoresTemplate::new(skill_heading(&q.skill), q);
    Ok(Html(page.render()?))
}

/// `GET /hiscores/skill/{skill}?rank=N` — rank lookup result page.
pub async fn rank_page(
    State(state): State<AppState>,
    Path(skill): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let q = SearchQuery::from_path_skill(&skill, &params);
    if state.dev {
        debug!(skill = %q.skill, rank = q.rank, "rendering rank page");
    }

    let mut page = HiscoresTemplate::new(skill_heading(&q.skill), q.clone());

    match state.client.hiscore_rank(&q.skill, q.rank).await {
        Ok(entry) => page.entries = vec![entry],
        Err(err) => page.error = lookup_error(&q, err),
    }

    Ok(Html(page.render()?))
}

/// `GET /hiscores/compare` — compare form; results render on `/hiscores`.
pub async fn compare_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let q = SearchQuery::from_params(&params);
    if state.dev {
        debug!("rendering compare page");
    }

    let page = HiscoresTemplate::new("Compare users", q);
    Ok(Html(page.render()?))
}

/// Fallback for everything the route table does not know.
pub async fn not_found_page() -> Result<(StatusCode, Html<String>), PageError> {
    Ok((StatusCode::NOT_FOUND, Html(NotFoundTemplate.render()?)))
}

fn lookup_error(q: &SearchQuery, err: crate::client::DataClientError) -> String {
    use crate::client::DataClientError::NotFound;

    match err {
        NotFound if !q.opponent.is_empty() => {
            format!("No hiscores found for {} vs {}", q.name, q.opponent)
        }
        NotFound if !q.name.is_empty() => format!("No hiscores found for {}", q.name),
        NotFound => format!("No rank {} found for {}", q.rank, q.skill),
        other => format!("Hiscore lookup failed: {other}"),
    }
}
