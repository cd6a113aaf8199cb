use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use hiscores_www::{
    build_router,
    client::{DataClientError, HiscoreComparison, HiscoreEntry, HiscoreLookup, SkillComparison},
    config::Config,
    state::AppState,
};

fn entry(skill: &str, rank: u32, username: &str) -> HiscoreEntry {
    HiscoreEntry {
        skill: skill.to_string(),
        rank,
        username: username.to_string(),
        level: 99,
        experience: 13_034_431,
    }
}

/// Knows Zezima and Woox; everything else is unranked.
struct FakeLookup;

#[async_trait]
impl HiscoreLookup for FakeLookup {
    async fn hiscore_rank(
        &self,
        skill: &str,
        rank: u32,
    ) -> Result<HiscoreEntry, DataClientError> {
        if rank <= 10 {
            Ok(entry(skill, rank, "Zezima"))
        } else {
            Err(DataClientError::NotFound)
        }
    }

    async fn hiscore_player(&self, name: &str) -> Result<Vec<HiscoreEntry>, DataClientError> {
        match name {
            "Zezima" | "Woox" => Ok(vec![entry("overall", 1, name)]),
            _ => Err(DataClientError::NotFound),
        }
    }

    async fn hiscore_compare(
        &self,
        name: &str,
        opponent: &str,
    ) -> Result<HiscoreComparison, DataClientError> {
        if name == "Zezima" && opponent == "Woox" {
            Ok(HiscoreComparison {
                name: name.to_string(),
                opponent: opponent.to_string(),
                entries: vec![SkillComparison {
                    skill: "overall".to_string(),
                    left: entry("overall", 1, name),
                    right: entry("overall", 2, opponent),
                }],
            })
        } else {
            Err(DataClientError::NotFound)
        }
    }
}

/// The data service is down.
struct BrokenLookup;

#[async_trait]
impl HiscoreLookup for BrokenLookup {
    async fn hiscore_rank(&self, _: &str, _: u32) -> Result<HiscoreEntry, DataClientError> {
        Err(DataClientError::Upstream(500))
    }

    async fn hiscore_player(&self, _: &str) -> Result<Vec<HiscoreEntry>, DataClientError> {
        Err(DataClientError::Upstream(500))
    }

    async fn hiscore_compare(
        &self,
        _: &str,
        _: &str,
    ) -> Result<HiscoreComparison, DataClientError> {
        Err(DataClientError::Upstream(500))
    }
}

fn router_with(client: Arc<dyn HiscoreLookup>) -> Router {
    let config = Config {
        port: 0,
        data_api_url: "http://localhost:4444".to_string(),
        data_api_password: String::new(),
    };

    build_router(AppState::new(config, client, false))
}

fn router() -> Router {
    router_with(Arc::new(FakeLookup))
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get(router(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}

#[tokio::test]
async fn api_rank_lookup_returns_entry() {
    let (status, body) = get(router(), "/api/hiscores/rank/attack?rank=5").await;

    assert_eq!(status, StatusCode::OK);
    let entry: HiscoreEntry = serde_json::from_str(&body).unwrap();
    assert_eq!(entry.skill, "attack");
    assert_eq!(entry.rank, 5);
}

#[tokio::test]
async fn api_rank_lookup_defaults_to_rank_one() {
    let (status, body) = get(router(), "/api/hiscores/rank/overall").await;

    assert_eq!(status, StatusCode::OK);
    let entry: HiscoreEntry = serde_json::from_str(&body).unwrap();
    assert_eq!(entry.rank, 1);
}

#[tokio::test]
async fn api_rank_zero_is_rejected() {
    let (status, _) = get(router(), "/api/hiscores/rank/attack?rank=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn api_unknown_rank_is_not_found() {
    let (status, _) = get(router(), "/api/hiscores/rank/attack?rank=99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_player_lookup_returns_entries() {
    let (status, body) = get(router(), "/api/hiscores/player/Zezima").await;

    assert_eq!(status, StatusCode::OK);
    let entries: Vec<HiscoreEntry> = serde_json::from_str(&body).unwrap();
    assert_eq!(entries[0].username, "Zezima");
}

#[tokio::test]
async fn api_compare_requires_both_names() {
    let (status, body) = get(router(), "/api/hiscores/compare?name=Zezima").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("opponent"));
}

#[tokio::test]
async fn api_compare_returns_comparison() {
    let (status, body) =
        get(router(), "/api/hiscores/compare?name=Zezima&opponent=Woox").await;

    assert_eq!(status, StatusCode::OK);
    let comparison: HiscoreComparison = serde_json::from_str(&body).unwrap();
    assert_eq!(comparison.entries.len(), 1);
}

#[tokio::test]
async fn api_upstream_failure_is_bad_gateway() {
    let (status, _) = get(
        router_with(Arc::new(BrokenLookup)),
        "/api/hiscores/player/Zezima",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn hiscores_page_prefills_name_from_url() {
    let (status, body) = get(router(), "/hiscores?name=Zezima").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Zezima""#));
}

#[tokio::test]
async fn hiscores_page_renders_compare_results() {
    let (status, body) = get(router(), "/hiscores?name=Zezima&opponent=Woox").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Woox""#));
    assert!(body.contains("13034431 xp"));
}

#[tokio::test]
async fn skill_page_rank_form_targets_that_skill() {
    let (status, body) = get(router(), "/hiscores/attack").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="/hiscores/skill/attack""#));
}

#[tokio::test]
async fn rank_page_shows_the_ranked_player() {
    let (status, body) = get(router(), "/hiscores/skill/attack?rank=5").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Zezima"));
}

#[tokio::test]
async fn unknown_player_renders_message_not_error_page() {
    let (status, body) = get(router(), "/hiscores?name=Nobody99").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No hiscores found for Nobody99"));
}

#[tokio::test]
async fn unknown_path_falls_back_to_not_found_page() {
    let (status, body) = get(router(), "/definitely/not/a/page").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}
