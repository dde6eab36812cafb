use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::errors::CoreError;
use crate::models::envelope::{ApiEnvelope, Page};

/// Shared slot for the bearer token.
///
/// Cloning shares the slot, so the facade and the client always see the
/// same value. A 401 from any endpoint empties it.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(token.filter(|t| !t.trim().is_empty()))),
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set(&self, token: Option<String>) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = token.filter(|t| !t.trim().is_empty());
    }

    pub fn clear(&self) {
        self.set(None);
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

/// HTTP client for the fund backend.
///
/// - Joins endpoint paths onto the configured base URL
/// - Sends `Authorization: Bearer …` when a token is held
/// - Maps status codes to [`CoreError`] (401 also clears the token)
/// - Unwraps the `{ success, data | error }` envelope
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<ClientConfig>,
    token: TokenStore,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        Self::with_token_store(config, TokenStore::default())
    }

    /// Build a client that shares an existing token slot.
    pub fn with_token_store(config: ClientConfig, token: TokenStore) -> Result<Self, CoreError> {
        config.validate()?;
        let builder = Client::builder().user_agent(config.user_agent.clone());
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        let http = builder.build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
            token,
        })
    }

    /// Client configured from the environment (`FUNDSCOPE_API_URL`, …).
    pub fn from_env() -> Result<Self, CoreError> {
        Self::new(ClientConfig::from_env())
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn token_store(&self) -> &TokenStore {
        &self.token
    }

    pub fn set_token(&self, token: Option<String>) {
        self.token.set(token);
    }

    // ── Envelope helpers ────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, CoreError> {
        self.envelope::<T, ()>(Method::GET, path, query, None)
            .await?
            .into_data(path)
    }

    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Page<T>, CoreError> {
        self.envelope::<Vec<T>, ()>(Method::GET, path, query, None)
            .await?
            .into_page(path)
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CoreError> {
        self.envelope::<T, B>(Method::POST, path, &[], Some(body))
            .await?
            .into_data(path)
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CoreError> {
        self.envelope::<T, B>(Method::PUT, path, &[], Some(body))
            .await?
            .into_data(path)
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CoreError> {
        self.envelope::<T, B>(Method::PATCH, path, &[], Some(body))
            .await?
            .into_data(path)
    }

    pub async fn delete(&self, path: &str) -> Result<(), CoreError> {
        self.envelope::<serde_json::Value, ()>(Method::DELETE, path, &[], None)
            .await?
            .into_unit(path)
    }

    /// GET a body that is not envelope-wrapped (e.g. `/health`).
    pub async fn get_raw<T: DeserializeOwned>(&self, path: &str) -> Result<T, CoreError> {
        let response = self.send::<()>(Method::GET, path, &[], None).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse response from {path}: {e}"))
        })
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn envelope<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<ApiEnvelope<T>, CoreError> {
        let response = self.send(method, path, query, body).await?;
        let text = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&text).map_err(|e| {
            CoreError::MalformedEnvelope(format!("{path}: {e}"))
        })?;
        if !envelope.success {
            warn!("{} reported failure: {}", path, envelope.failure_message());
        }
        Ok(envelope)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<Response, CoreError> {
        let url = self.config.url(path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.token.get() {
            request = request.bearer_auth(token);
        }
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("{} {} -> {}", method, path, status);

        if status == StatusCode::UNAUTHORIZED {
            warn!("{} {} returned 401, clearing access token", method, path);
            self.token.clear();
            return Err(CoreError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            error!("{} {} failed with status {}: {}", method, path, status, message);
            return Err(match status {
                StatusCode::NOT_FOUND => CoreError::NotFound(path.to_string()),
                s if s.is_server_error() => CoreError::Server {
                    status: s.as_u16(),
                    message,
                },
                s => CoreError::Http {
                    status: s.as_u16(),
                    message,
                },
            });
        }

        Ok(response)
    }
}

/// Pull `error` or `message` out of a JSON error body, if there is one.
fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .filter(|s| !s.trim().is_empty())
}
