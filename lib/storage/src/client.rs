//! Storage backend client.
//!
//! Resolves its base URL once at construction, owns the auth slot, and runs
//! every outgoing request URL through [`StorageClient::before_send`].

use crate::auth_store::{AuthRecord, AuthStore, MemoryAuthStore};
use crate::base_url::resolve_base_url;
use crate::error::StorageError;
use crate::sanitize::sanitize_api_url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument, warn};
use training_hub_core::{Result, RuntimeOrigin};

/// Path of the password sign-in endpoint for the users collection.
pub const AUTH_WITH_PASSWORD_PATH: &str = "/api/collections/users/auth-with-password";

/// Body returned by the password sign-in endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub record: AuthRecord,
}

/// HTTP client for the record-storage backend.
pub struct StorageClient {
    base_url: String,
    origin: Option<RuntimeOrigin>,
    http: reqwest::Client,
    auth_store: Arc<MemoryAuthStore>,
    warned_rewrite: AtomicBool,
}

impl StorageClient {
    /// Creates a client for the configured base URL.
    ///
    /// `raw_base_url` may be empty or relative; see
    /// [`resolve_base_url`](crate::resolve_base_url).
    #[must_use]
    pub fn new(raw_base_url: &str, origin: Option<RuntimeOrigin>) -> Self {
        let base_url = resolve_base_url(raw_base_url, origin.as_ref());
        debug!(base_url = %base_url, "resolved storage base url");

        Self {
            base_url,
            origin,
            http: reqwest::Client::new(),
            auth_store: Arc::new(MemoryAuthStore::new()),
            warned_rewrite: AtomicBool::new(false),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Returns the resolved base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the runtime origin the client was configured with.
    #[must_use]
    pub fn origin(&self) -> Option<&RuntimeOrigin> {
        self.origin.as_ref()
    }

    /// Returns the auth slot.
    #[must_use]
    pub fn auth_store(&self) -> &Arc<MemoryAuthStore> {
        &self.auth_store
    }

    /// Joins an API path onto the base URL.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.base_url.ends_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Hook applied to every request URL right before it is sent.
    ///
    /// Route-prefixed API URLs are rewritten to the root `/api` path. The
    /// first rewrite per client is logged as a warning, later ones at debug.
    pub fn before_send(&self, url: &str) -> String {
        let sanitized = sanitize_api_url(url, self.origin.as_ref());
        if !sanitized.rewritten {
            return sanitized.url;
        }

        if self.warned_rewrite.swap(true, Ordering::Relaxed) {
            debug!(from = %url, to = %sanitized.url, "rewrote route-relative api url");
        } else {
            warn!(
                from = %url,
                to = %sanitized.url,
                "rewrote route-relative API URL to root /api path; check the storage base URL config"
            );
        }
        sanitized.url
    }

    /// Returns true once a route-relative URL has been rewritten.
    #[must_use]
    pub fn has_rewritten_urls(&self) -> bool {
        self.warned_rewrite.load(Ordering::Relaxed)
    }

    /// Fetches and decodes a JSON document from an API path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transport`] on network failure,
    /// [`StorageError::RequestRejected`] on a non-2xx answer, or
    /// [`StorageError::InvalidResponse`] if the body does not decode.
    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorageError> {
        let url = self.before_send(&self.build_url(path));
        let mut request = self.http.get(&url);
        if let Some(token) = self.auth_store.token() {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        let response = request.send().await.map_err(|e| StorageError::Transport {
            details: e.to_string(),
        })?;
        let response = Self::ensure_success(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| StorageError::InvalidResponse {
                details: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Signs in to the users collection with an identity and password.
    ///
    /// On success the returned token and record are saved into the auth slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::RequestRejected`] if the backend refuses the
    /// credentials, [`StorageError::Transport`] on network failure, or
    /// [`StorageError::InvalidResponse`] if the body does not decode.
    #[instrument(skip(self, password))]
    pub async fn auth_with_password(
        &self,
        identity: &str,
        password: &str,
    ) -> Result<AuthRecord, StorageError> {
        let url = self.before_send(&self.build_url(AUTH_WITH_PASSWORD_PATH));
        let body = serde_json::json!({
            "identity": identity,
            "password": password,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::Transport {
                details: e.to_string(),
            })?;
        let response = Self::ensure_success(response).await?;

        let auth = response
            .json::<AuthResponse>()
            .await
            .map_err(|e| StorageError::InvalidResponse {
                details: e.to_string(),
            })?;

        self.auth_store.save(&auth.token, auth.record.clone());
        debug!(record_id = %auth.record.id, "stored password sign-in");
        Ok(auth.record)
    }

    /// Checks HTTP response status; returns the response on success or an error with details.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StorageError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let details = response.text().await.unwrap_or_default();
        Err(StorageError::RequestRejected { status, details }.into())
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("base_url", &self.base_url)
            .field("origin", &self.origin)
            .field("authenticated", &self.auth_store.is_valid())
            .finish_non_exhaustive()
    }
}
