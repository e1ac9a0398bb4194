// League API client.
//
// `LeagueApi` is the seam between the orchestrator and the network; the
// reqwest-backed `HttpLeagueApi` talks to the real server. Error bodies are
// `{ "detail": ... }` and their text is carried into `ApiError::Status`.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{
    Ack, HistorySnapshot, NewPlayer, Player, PlayerId, SalaryRecord, SalaryUpdate, ScoringRules,
    Settings, Stat, Team, TeamId, UploadSummary,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Text suitable for showing to the user: the server's own explanation
    /// when it sent one, otherwise a generic line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Status {
                status,
                detail: None,
            } => format!("Request failed (HTTP {status})"),
            ApiError::Transport(_) => "Could not reach the league server".to_string(),
            ApiError::Decode(_) => "Unexpected response from the league server".to_string(),
        }
    }
}

/// Pull the `detail` field out of an error body. Non-string details (e.g.
/// validation error lists) are rendered as compact JSON.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The remote league endpoints.
#[async_trait]
pub trait LeagueApi: Send + Sync {
    async fn teams(&self) -> Result<Vec<Team>, ApiError>;
    async fn free_agents(&self) -> Result<Vec<Player>, ApiError>;
    async fn scoring_rules(&self) -> Result<ScoringRules, ApiError>;
    async fn team_history(&self) -> Result<Vec<HistorySnapshot>, ApiError>;
    async fn team_player_history(
        &self,
        team_id: TeamId,
        stat: Stat,
    ) -> Result<Vec<HistorySnapshot>, ApiError>;
    async fn player_history(&self, player_id: PlayerId) -> Result<Vec<HistorySnapshot>, ApiError>;
    async fn player(&self, player_id: PlayerId) -> Result<Player, ApiError>;
    async fn settings(&self) -> Result<Settings, ApiError>;
    async fn salaries(&self) -> Result<Vec<SalaryRecord>, ApiError>;

    async fn sync(&self) -> Result<Ack, ApiError>;
    async fn sync_salaries(&self) -> Result<Ack, ApiError>;
    async fn update_settings(&self, settings: &Settings) -> Result<Ack, ApiError>;
    async fn upload_salaries(
        &self,
        file_name: String,
        contents: Vec<u8>,
    ) -> Result<UploadSummary, ApiError>;
    async fn create_player(&self, player: &NewPlayer) -> Result<Ack, ApiError>;
    async fn update_salary(
        &self,
        player_id: PlayerId,
        update: &SalaryUpdate,
    ) -> Result<Ack, ApiError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

pub struct HttpLeagueApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLeagueApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = self.http.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("POST {}", path);
        let response = self.http.post(self.url(path)).send().await?;
        decode(response).await
    }

    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, path);
        let response = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

/// Map a response to `T`, or to `ApiError::Status` for non-2xx codes.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl LeagueApi for HttpLeagueApi {
    async fn teams(&self) -> Result<Vec<Team>, ApiError> {
        self.get("/api/teams").await
    }

    async fn free_agents(&self) -> Result<Vec<Player>, ApiError> {
        self.get("/api/players/free_agents").await
    }

    async fn scoring_rules(&self) -> Result<ScoringRules, ApiError> {
        self.get("/api/settings/scoring").await
    }

    async fn team_history(&self) -> Result<Vec<HistorySnapshot>, ApiError> {
        self.get("/api/teams/history").await
    }

    async fn team_player_history(
        &self,
        team_id: TeamId,
        stat: Stat,
    ) -> Result<Vec<HistorySnapshot>, ApiError> {
        self.get(&format!(
            "/api/teams/{team_id}/players/history?stat={}",
            stat.key()
        ))
        .await
    }

    async fn player_history(&self, player_id: PlayerId) -> Result<Vec<HistorySnapshot>, ApiError> {
        self.get(&format!("/api/players/{player_id}/history")).await
    }

    async fn player(&self, player_id: PlayerId) -> Result<Player, ApiError> {
        self.get(&format!("/api/players/{player_id}")).await
    }

    async fn settings(&self) -> Result<Settings, ApiError> {
        self.get("/api/settings").await
    }

    async fn salaries(&self) -> Result<Vec<SalaryRecord>, ApiError> {
        self.get("/api/salaries").await
    }

    async fn sync(&self) -> Result<Ack, ApiError> {
        self.post_empty("/api/sync").await
    }

    async fn sync_salaries(&self) -> Result<Ack, ApiError> {
        self.post_empty("/api/sync/salaries").await
    }

    async fn update_settings(&self, settings: &Settings) -> Result<Ack, ApiError> {
        self.send_json(reqwest::Method::POST, "/api/settings", settings)
            .await
    }

    async fn upload_salaries(
        &self,
        file_name: String,
        contents: Vec<u8>,
    ) -> Result<UploadSummary, ApiError> {
        debug!("POST /api/salaries/upload ({} bytes)", contents.len());
        let part = reqwest::multipart::Part::bytes(contents)
            .file_name(file_name)
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .http
            .post(self.url("/api/salaries/upload"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn create_player(&self, player: &NewPlayer) -> Result<Ack, ApiError> {
        self.send_json(reqwest::Method::POST, "/api/players", player)
            .await
    }

    async fn update_salary(
        &self,
        player_id: PlayerId,
        update: &SalaryUpdate,
    ) -> Result<Ack, ApiError> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/api/players/{player_id}/salary"),
            update,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_extracted_from_error_bodies() {
        assert_eq!(
            error_detail(r#"{"detail": "Player not found"}"#).as_deref(),
            Some("Player not found")
        );
        assert_eq!(
            error_detail(r#"{"detail": [{"loc": ["body"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body"]}]"#)
        );
        assert!(error_detail(r#"{"detail": null}"#).is_none());
        assert!(error_detail(r#"{"message": "ok"}"#).is_none());
        assert!(error_detail("<html>502</html>").is_none());
    }

    #[test]
    fn user_message_prefers_server_detail() {
        let with = ApiError::Status {
            status: 400,
            detail: Some("Salary cap must be positive".into()),
        };
        assert_eq!(with.user_message(), "Salary cap must be positive");

        let without = ApiError::Status {
            status: 503,
            detail: None,
        };
        assert_eq!(without.user_message(), "Request failed (HTTP 503)");
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let api = HttpLeagueApi::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/api/teams"), "http://localhost:8000/api/teams");
    }
}
