//! API client for the clinic backend.
//!
//! Every outbound call goes through [`ApiClient::request`], which:
//! - attaches `Authorization: Bearer <token>` and `x-current-role: <role>`
//!   from persisted storage when present
//! - on HTTP 401 wipes the persisted credentials and forces navigation to
//!   the public root before handing [`ApiError::AuthExpired`] to the caller
//! - turns every other non-2xx status into [`ApiError::Status`] carrying the
//!   server's `message` when the body has one

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::storage::{CredentialStore, SharedStorage};
use crate::config::AppConfig;

/// Header carrying the active role so the backend can scope authorization
pub const CURRENT_ROLE_HEADER: &str = "x-current-role";

/// Path the client navigates to on a forced logout
pub const PUBLIC_ROOT: &str = "/";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("authentication expired")]
    AuthExpired { message: Option<String> },
    #[error("server returned {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// Server-provided message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::AuthExpired { message } | ApiError::Status { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Message to show the user: the server's when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthExpired { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Forced client-side navigation, used by the 401 handler.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Navigates the browser window. Always a full page load, even onto the
/// current path, so the app rehydrates from the wiped storage.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.location().set_href(path).is_err() {
            tracing::warn!("Failed to navigate to {}", path);
        }
    }
}

/// Records the redirect in the log only (SSR has no window to navigate).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, path: &str) {
        tracing::debug!("Redirect to {} requested outside the browser", path);
    }
}

/// Platform default navigator
pub fn default_navigator() -> Arc<dyn Navigator> {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(BrowserNavigator)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(LogNavigator)
    }
}

/// List responses arrive as `{ "data": [...] }`; some endpoints return a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Wrapped { data } => data,
            ListEnvelope::Bare(items) => items,
        }
    }
}

/// Single-record responses may be wrapped in `{ "data": {...} }` as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: SharedStorage,
    navigator: Arc<dyn Navigator>,
    timeout: Option<Duration>,
    profile_timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && Arc::ptr_eq(&self.storage, &other.storage)
            && Arc::ptr_eq(&self.navigator, &other.navigator)
    }
}

impl ApiClient {
    pub fn new(config: &AppConfig, storage: SharedStorage, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            storage,
            navigator,
            timeout: config.request_timeout(),
            profile_timeout: config.profile_timeout(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Bound on the rehydration profile fetch
    pub fn profile_timeout(&self) -> Duration {
        self.profile_timeout
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the raw response when the status is 2xx.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        self.send(method, path, body, self.timeout).await
    }

    /// Same as [`request`](Self::request) with an explicit timeout.
    pub async fn request_with_timeout(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        timeout: Duration,
    ) -> Result<reqwest::Response, ApiError> {
        self.send(method, path, body, Some(timeout)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        let mut builder = self.http.request(method.clone(), &url);

        if let Some(token) = self.storage.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(role) = self.storage.active_role() {
            builder = builder.header(CURRENT_ROLE_HEADER, role.as_str());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder = with_timeout(builder, timeout);

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, path, e);
            if e.is_timeout() {
                ApiError::Transport("délai d'attente dépassé".to_string())
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = server_message(&response.text().await.unwrap_or_default());

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("{} {} returned 401, forcing logout", method, path);
            self.storage.wipe();
            self.navigator.redirect(PUBLIC_ROOT);
            return Err(ApiError::AuthExpired { message });
        }

        tracing::warn!("{} {} returned {}", method, path, status);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = self.request(method, path, body.as_ref()).await?;
        decode_body(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json::<(), T>(Method::GET, path, None).await
    }

    /// GET bounded by `timeout` instead of the client-wide default
    pub async fn get_within<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let response = self
            .request_with_timeout(Method::GET, path, None, timeout)
            .await?;
        decode_body(response).await
    }

    /// GET a single record, unwrapping an optional `data` envelope.
    pub async fn get_item<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let envelope: ItemEnvelope<T> = self.get(path).await?;
        Ok(match envelope {
            ItemEnvelope::Wrapped { data } => data,
            ItemEnvelope::Bare(item) => item,
        })
    }

    /// GET a collection, unwrapping the `data` envelope.
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let envelope: ListEnvelope<T> = self.get(path).await?;
        Ok(envelope.into_vec())
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, Some(body)).await
    }

    /// PUT with no request body (status toggles)
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json::<(), T>(Method::PUT, path, None).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json::<(), T>(Method::DELETE, path, None).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn with_timeout(builder: reqwest::RequestBuilder, timeout: Option<Duration>) -> reqwest::RequestBuilder {
    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

// fetch() has no per-request timeout
#[cfg(target_arch = "wasm32")]
fn with_timeout(builder: reqwest::RequestBuilder, _timeout: Option<Duration>) -> reqwest::RequestBuilder {
    builder
}

/// Decode a JSON body; an empty body decodes as `null`.
async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Extract `message` (or `error`) from an error body
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|m| m.as_str()))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::MemoryStorage;

    fn client(base: &str) -> ApiClient {
        let config = AppConfig {
            api_base_url: base.to_string(),
            ..AppConfig::default()
        };
        ApiClient::new(&config, MemoryStorage::shared(), Arc::new(LogNavigator))
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let api = client("http://localhost:5014/api/");
        assert_eq!(api.url("/login"), "http://localhost:5014/api/login");
        assert_eq!(api.url("user/profile"), "http://localhost:5014/api/user/profile");
    }

    #[test]
    fn server_message_prefers_message_then_error() {
        assert_eq!(
            server_message(r#"{"message":"Mot de passe incorrect"}"#).as_deref(),
            Some("Mot de passe incorrect")
        );
        assert_eq!(
            server_message(r#"{"error":"Token invalide"}"#).as_deref(),
            Some("Token invalide")
        );
        assert_eq!(server_message(r#"{"message":""}"#), None);
        assert_eq!(server_message("<html>502</html>"), None);
    }

    #[test]
    fn user_message_falls_back_when_server_is_silent() {
        let err = ApiError::Status {
            status: 400,
            message: None,
        };
        assert_eq!(err.user_message("Erreur de connexion"), "Erreur de connexion");

        let err = ApiError::AuthExpired {
            message: Some("Identifiants invalides".into()),
        };
        assert_eq!(err.user_message("Erreur de connexion"), "Identifiants invalides");
        assert_eq!(err.status(), Some(401));
        assert!(err.is_auth_expired());
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message("Erreur réseau"), "Erreur réseau");
    }

    #[test]
    fn list_envelope_accepts_wrapped_and_bare() {
        let wrapped: ListEnvelope<u32> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        assert_eq!(wrapped.into_vec(), vec![1, 2]);
        let bare: ListEnvelope<u32> = serde_json::from_str("[3]").unwrap();
        assert_eq!(bare.into_vec(), vec![3]);
    }
}
