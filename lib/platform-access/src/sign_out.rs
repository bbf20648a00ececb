//! SSO sign-out redirect.
//!
//! Signing out ends the SSO session at the identity provider, which then
//! sends the browser back to the application root. That is a full-page
//! navigation, so this module only builds the URL to navigate to.

use training_hub_core::{Result, RuntimeOrigin};
use url::form_urlencoded;

use crate::error::SignOutError;

/// Query parameter the logout endpoint reads the return address from.
pub const RETURN_TO_PARAM: &str = "ReturnTo";

/// Where to send the browser after local sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOutRedirect {
    location: String,
}

impl SignOutRedirect {
    /// Builds `<logout_url>?ReturnTo=<urlencoded app root>`.
    ///
    /// The app root is `origin + "/"`, or `/` when no origin is known.
    ///
    /// # Errors
    ///
    /// Returns [`SignOutError::MissingLogoutUrl`] if `logout_url` is blank.
    pub fn new(
        logout_url: &str,
        origin: Option<&RuntimeOrigin>,
    ) -> Result<Self, SignOutError> {
        let logout_url = logout_url.trim();
        if logout_url.is_empty() {
            return Err(SignOutError::MissingLogoutUrl.into());
        }

        let return_to = origin.map_or_else(|| "/".to_string(), RuntimeOrigin::root);
        let encoded: String = form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
        let separator = if logout_url.contains('?') { '&' } else { '?' };

        Ok(Self {
            location: format!("{logout_url}{separator}{RETURN_TO_PARAM}={encoded}"),
        })
    }

    /// Returns the URL to navigate to.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl std::fmt::Display for SignOutRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.location)
    }
}
