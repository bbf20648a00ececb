//! Access to the identity ("whoami") endpoint.
//!
//! The resolver only needs "GET this URL with the caller's credentials and
//! give me the status and body". [`WhoamiFetcher`] is that capability;
//! [`ReqwestWhoamiFetcher`] is the HTTP implementation.

use async_trait::async_trait;
use rootcause::prelude::Report;
use tracing::{debug, instrument};
use training_hub_core::RuntimeOrigin;
use url::Url;

use crate::error::WhoamiError;

/// Raw answer of the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoamiReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl WhoamiReply {
    /// Creates a reply with a JSON body.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    /// Creates a reply with no body.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to issue a credentialed GET against the identity endpoint.
#[async_trait]
pub trait WhoamiFetcher: Send + Sync {
    /// Fetches `whoami_url`.
    ///
    /// Non-2xx statuses are returned as replies, not errors.
    async fn fetch(&self, whoami_url: &str) -> Result<WhoamiReply, Report<WhoamiError>>;
}

/// [`WhoamiFetcher`] over `reqwest`.
///
/// A browser sends the SSO session cookie automatically. This client has no
/// ambient cookie jar, so the cookie header to forward is configured
/// explicitly with [`with_cookie`](Self::with_cookie).
#[derive(Debug, Clone)]
pub struct ReqwestWhoamiFetcher {
    http: reqwest::Client,
    origin: Option<RuntimeOrigin>,
    cookie: Option<String>,
}

impl ReqwestWhoamiFetcher {
    /// Creates a fetcher that resolves relative URLs against `origin`.
    #[must_use]
    pub fn new(origin: Option<RuntimeOrigin>) -> Self {
        Self {
            http: reqwest::Client::new(),
            origin,
            cookie: None,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Sets the `Cookie` header carrying the SSO session.
    #[must_use]
    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie.filter(|c| !c.is_empty());
        self
    }

    /// Resolves `whoami_url` to an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`WhoamiError::InvalidUrl`] if the URL is relative and no
    /// origin is configured, or if it does not parse.
    pub fn resolve_url(&self, whoami_url: &str) -> Result<Url, Report<WhoamiError>> {
        let invalid = |reason: String| WhoamiError::InvalidUrl {
            url: whoami_url.to_string(),
            reason,
        };

        match Url::parse(whoami_url) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = self
                    .origin
                    .as_ref()
                    .ok_or_else(|| invalid("relative URL without a configured origin".to_string()))?;
                Url::parse(&origin.root())
                    .and_then(|base| base.join(whoami_url))
                    .map_err(|e| invalid(e.to_string()).into())
            }
            Err(e) => Err(invalid(e.to_string()).into()),
        }
    }
}

#[async_trait]
impl WhoamiFetcher for ReqwestWhoamiFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, whoami_url: &str) -> Result<WhoamiReply, Report<WhoamiError>> {
        let url = self.resolve_url(whoami_url)?;

        let mut request = self.http.get(url);
        if let Some(cookie) = &self.cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| WhoamiError::Transport {
            details: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| WhoamiError::InvalidBody {
                details: e.to_string(),
            })?;

        debug!(status, bytes = body.len(), "whoami answered");
        Ok(WhoamiReply {
            status,
            body: body.to_vec(),
        })
    }
}
