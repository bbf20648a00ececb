//! Auth configuration.
//!
//! Every field has a default, so an empty environment gives a working
//! same-origin setup: whoami at `/whoami`, logout at `/mellon/logout`,
//! admin sign-in disabled.

use serde::{Deserialize, Serialize};

/// Configuration for SSO auth-state resolution and sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity endpoint, absolute or relative to the app origin.
    /// Default: "/whoami"
    #[serde(default = "default_whoami_url")]
    whoami_url: String,
    /// Whether a stored admin sign-in short-circuits whoami.
    /// Default: false
    #[serde(default)]
    enable_admin_login: bool,
    /// SSO logout endpoint the browser is sent to on sign-out.
    /// Default: "/mellon/logout"
    #[serde(default = "default_sso_logout_url")]
    sso_logout_url: String,
    /// `Cookie` header carrying the SSO session, for non-browser callers.
    #[serde(default)]
    session_cookie: Option<String>,
}

fn default_whoami_url() -> String {
    "/whoami".to_string()
}

fn default_sso_logout_url() -> String {
    "/mellon/logout".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            whoami_url: default_whoami_url(),
            enable_admin_login: false,
            sso_logout_url: default_sso_logout_url(),
            session_cookie: None,
        }
    }
}

impl AuthConfig {
    /// Creates a configuration with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the identity endpoint.
    #[must_use]
    pub fn with_whoami_url(mut self, url: impl Into<String>) -> Self {
        self.whoami_url = url.into();
        self
    }

    /// Enables or disables the stored admin sign-in shortcut.
    #[must_use]
    pub fn with_admin_login(mut self, enabled: bool) -> Self {
        self.enable_admin_login = enabled;
        self
    }

    /// Overrides the SSO logout endpoint.
    #[must_use]
    pub fn with_sso_logout_url(mut self, url: impl Into<String>) -> Self {
        self.sso_logout_url = url.into();
        self
    }

    /// Sets the SSO session cookie to forward.
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Returns the identity endpoint.
    #[must_use]
    pub fn whoami_url(&self) -> &str {
        &self.whoami_url
    }

    /// Returns true if the stored admin sign-in shortcut is enabled.
    #[must_use]
    pub fn enable_admin_login(&self) -> bool {
        self.enable_admin_login
    }

    /// Returns the SSO logout endpoint.
    #[must_use]
    pub fn sso_logout_url(&self) -> &str {
        &self.sso_logout_url
    }

    /// Returns the SSO session cookie, if configured.
    #[must_use]
    pub fn session_cookie(&self) -> Option<&str> {
        self.session_cookie.as_deref()
    }
}
