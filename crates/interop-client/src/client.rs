//! Async client for the team endpoints.

use interop_core::{Mission, ObstacleSet, ServerStatus, Target, Telemetry};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Client for one team's session against an interop server.
#[derive(Debug, Clone)]
pub struct InteropClient {
    base_url: String,
    session_token: Option<String>,
    client: reqwest::Client,
}

impl InteropClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            session_token: None,
            client: reqwest::Client::new(),
        }
    }

    /// Use the session token the judges issued for this team.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.session_token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        Ok(builder.bearer_auth(token))
    }

    /// Fetch the current server status. Each call is recorded in the
    /// server's access log.
    pub async fn server_info(&self) -> Result<ServerStatus> {
        let request = self.authorized(self.client.get(self.url("/api/server_info")))?;
        decode(request.send().await?).await
    }

    pub async fn post_telemetry(&self, telemetry: &Telemetry) -> Result<()> {
        let request = self.authorized(self.client.post(self.url("/api/telemetry")))?;
        let response = request.json(telemetry).send().await?;
        check(response).await?;
        tracing::debug!(
            lat = telemetry.latitude,
            lon = telemetry.longitude,
            "Telemetry posted"
        );
        Ok(())
    }

    pub async fn obstacles(&self) -> Result<ObstacleSet> {
        let request = self.authorized(self.client.get(self.url("/api/obstacles")))?;
        decode(request.send().await?).await
    }

    pub async fn missions(&self) -> Result<Vec<Mission>> {
        let request = self.authorized(self.client.get(self.url("/api/missions")))?;
        decode(request.send().await?).await
    }

    /// Report a target. The returned copy carries the server-assigned id.
    pub async fn post_target(&self, target: &Target) -> Result<Target> {
        let request = self.authorized(self.client.post(self.url("/api/targets")))?;
        decode(request.json(target).send().await?).await
    }

    pub async fn targets(&self) -> Result<Vec<Target>> {
        let request = self.authorized(self.client.get(self.url("/api/targets")))?;
        decode(request.send().await?).await
    }

    pub async fn target(&self, id: i64) -> Result<Target> {
        let path = format!("/api/targets/{}", id);
        let request = self.authorized(self.client.get(self.url(&path)))?;
        decode(request.send().await?).await
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Server {
        status,
        message: error_message(&body),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    Ok(check(response).await?.json().await?)
}

/// Pull the `error` field out of a JSON error body, falling back to the raw
/// text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
