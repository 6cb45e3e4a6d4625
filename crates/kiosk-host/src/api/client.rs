//! HTTP implementation of [`KioskApi`] built on reqwest

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use kiosk_core::{Game, GameId};

use super::protocol::{
    decode_catalog, AuthRequest, AuthResponse, HeartbeatRequest, HeartbeatResponse, StartGameRequest,
    StartGameResponse, AUTH_PATH, GAMES_PATH, HEARTBEAT_PATH, START_GAME_PATH,
};
use super::{ApiError, ApiResult, KioskApi};

/// Backend client holding a connection pool and the API base URL
#[derive(Debug, Clone)]
pub struct HttpKioskClient {
    client: Client,
    base_url: Url,
}

impl HttpKioskClient {
    /// Create a client for `base_url`, e.g. `http://127.0.0.1:8000/api`
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiError::local(format!("Invalid API base URL '{base_url}': {e}")))?;

        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::local(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::local(format!("Invalid endpoint '{path}': {e}")))
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str, token: &str) -> ApiResult<R> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);
        Self::send(self.client.get(url).bearer_auth(token)).await
    }

    async fn post_json<B, R>(&self, path: &str, token: Option<&str>, body: &B) -> ApiResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let mut request = self.client.post(url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::send(request).await
    }

    async fn send<R: DeserializeOwned>(request: RequestBuilder) -> ApiResult<R> {
        let response = request.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            let body = serde_json::from_slice(&bytes).ok();
            warn!("Backend responded with {}", status);
            return Err(ApiError::status(status.as_u16(), body));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::local(format!("Invalid response body: {e}")))
    }
}

impl KioskApi for HttpKioskClient {
    async fn authenticate(&self, device_id: &str, version: &str) -> ApiResult<AuthResponse> {
        self.post_json(AUTH_PATH, None, &AuthRequest { device_id, version })
            .await
    }

    async fn fetch_catalog(&self, token: &str) -> ApiResult<Vec<Game>> {
        let entries: Vec<serde_json::Value> = self.get_json(GAMES_PATH, token).await?;
        Ok(decode_catalog(entries))
    }

    async fn send_heartbeat(
        &self,
        token: &str,
        current_game_id: Option<&GameId>,
    ) -> ApiResult<HeartbeatResponse> {
        self.post_json(
            HEARTBEAT_PATH,
            Some(token),
            &HeartbeatRequest { current_game_id },
        )
        .await
    }

    async fn start_game(&self, token: &str, game_slug: &GameId) -> ApiResult<StartGameResponse> {
        self.post_json(START_GAME_PATH, Some(token), &StartGameRequest { game_slug })
            .await
    }
}
