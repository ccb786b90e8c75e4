//! Core request wrapper.

use crate::envelope::{extract_error_message, unwrap_data};
use crate::{ApiError, ApiResult};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use springboard_storage::SessionStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Versioned path prefix appended to the configured base URL.
pub const API_PREFIX: &str = "/api/v1";

/// Callback invoked when the server invalidates the session (401).
///
/// Injected at construction; at most one hook per client. Fired after
/// the local session has already been cleared, so subscribers can drop
/// any cached authenticated data.
pub type SessionInvalidatedHook = Arc<dyn Fn() + Send + Sync>;

/// Whether a call carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Bearer,
    Skip,
}

/// REST client for the SpringBoard backend.
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    store: Arc<SessionStore>,
    on_session_invalidated: Option<SessionInvalidatedHook>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    /// * `base_url` - Backend origin, without the `/api/v1` prefix
    /// * `store` - Session store the bearer token is read from (and
    ///   cleared in on 401)
    /// * `on_session_invalidated` - Optional hook fired after a 401
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<SessionStore>,
        on_session_invalidated: Option<SessionInvalidatedHook>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            store,
            on_session_invalidated,
        }
    }

    /// Build the absolute URL for an API path.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Session store this client reads the bearer token from.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Send a request and normalize the response envelope.
    ///
    /// 401 handling happens here and nowhere else: the local session is
    /// cleared synchronously, the invalidation hook fires, and the call
    /// fails with [`ApiError::SessionExpired`].
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        auth: Auth,
    ) -> ApiResult<T> {
        let url = self.api_url(path);
        debug!(method = %method, url = %url, "API request");

        let mut request = self.http_client.request(method, &url);

        if auth == Auth::Bearer {
            if let Some(token) = self.store.get_token()? {
                request = request.header("Authorization", format!("Bearer {}", token));
            }
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 401 {
            warn!(url = %url, "Server invalidated session (401), clearing local session");
            self.store.clear()?;
            if let Some(hook) = &self.on_session_invalidated {
                hook();
            }
            return Err(ApiError::SessionExpired);
        }

        let text = response.text().await?;
        let json: Value = serde_json::from_str(&text).map_err(|_| {
            ApiError::InvalidResponse(format!("non-JSON body (HTTP {})", status.as_u16()))
        })?;

        if !status.is_success() {
            let message =
                extract_error_message(&json).unwrap_or_else(|| "Request failed".to_string());
            warn!(status = %status, message = %message, "API request failed");
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(unwrap_data(json))
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
