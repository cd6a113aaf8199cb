//! Client for the hiscore data service.
//!
//! The service requires a handshake followed by password authentication;
//! lookups carry the session token returned by `/authenticate`. One client
//! is built at startup and shared by every in-flight request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum DataClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("handshake rejected with status {0}")]
    HandshakeRejected(u16),

    #[error("authentication rejected with status {0}")]
    AuthRejected(u16),

    #[error("not found")]
    NotFound,

    #[error("data service returned status {0}")]
    Upstream(u16),
}

/// One leaderboard row: a player's standing in a single skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiscoreEntry {
    pub skill: String,
    pub rank: u32,
    pub username: String,
    pub level: u32,
    pub experience: u64,
}

/// Side-by-side standing of two players in one skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillComparison {
    pub skill: String,
    pub left: HiscoreEntry,
    pub right: HiscoreEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiscoreComparison {
    pub name: String,
    pub opponent: String,
    pub entries: Vec<SkillComparison>,
}

/// Lookup surface the route handlers depend on. Handlers are tested
/// against a fake implementation; the live one is [`DataClient`].
#[async_trait]
pub trait HiscoreLookup: Send + Sync {
    async fn hiscore_rank(&self, skill: &str, rank: u32)
        -> Result<HiscoreEntry, DataClientError>;

    async fn hiscore_player(&self, name: &str) -> Result<Vec<HiscoreEntry>, DataClientError>;

    async fn hiscore_compare(
        &self,
        name: &str,
        opponent: &str,
    ) -> Result<HiscoreComparison, DataClientError>;
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
}

pub struct DataClient {
    http: reqwest::Client,
    base_url: String,
    password: String,
    token: Option<String>,
}

impl DataClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.data_api_url.trim_end_matches('/').to_string(),
            password: config.data_api_password.clone(),
            token: None,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> &str {
        // Bootstrap authenticates before any lookup can run.
        self.token.as_deref().unwrap_or("")
    }

    /// Handshake with the data service. Must succeed before
    /// [`authenticate`](Self::authenticate).
    pub async fn connect(&self) -> Result<(), DataClientError> {
        let response = self.http.get(self.endpoint("/handshake")).send().await?;

        if !response.status().is_success() {
            return Err(DataClientError::HandshakeRejected(
                response.status().as_u16(),
            ));
        }

        Ok(())
    }

    /// Exchanges the configured password for a session token.
    pub async fn authenticate(&mut self) -> Result<(), DataClientError> {
        let response = self
            .http
            .post(self.endpoint("/authenticate"))
            .json(&AuthRequest {
                password: &self.password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataClientError::AuthRejected(response.status().as_u16()));
        }

        let auth: AuthResponse = response.json().await?;
        self.token = Some(auth.token);

        Ok(())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DataClientError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .bearer_auth(self.token())
            .query(query)
            .send()
            .await?;

        match response.status().as_u16() {
            404 => Err(DataClientError::NotFound),
            status if !response.status().is_success() => Err(DataClientError::Upstream(status)),
            _ => Ok(response.json().await?),
        }
    }
}

#[async_trait]
impl HiscoreLookup for DataClient {
    async fn hiscore_rank(
        &self,
        skill: &str,
        rank: u32,
    ) -> Result<HiscoreEntry, DataClientError> {
        self.get_json(
            &format!("/hiscores/rank/{skill}"),
            &[("rank", rank.to_string())],
        )
        .await
    }

    async fn hiscore_player(&self, name: &str) -> Result<Vec<HiscoreEntry>, DataClientError> {
        self.get_json(&format!("/hiscores/player/{name}"), &[]).await
    }

    async fn hiscore_compare(
        &self,
        name: &str,
        opponent: &str,
    ) -> Result<HiscoreComparison, DataClientError> {
        self.get_json(
            "/hiscores/compare",
            &[
                ("name", name.to_string()),
                ("opponent", opponent.to_string()),
            ],
        )
        .await
    }
}
