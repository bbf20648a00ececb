//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `WhoamiError`: failures talking to the identity endpoint
//! - `SignOutError`: a sign-out redirect could not be built
//!
//! Auth-state resolution itself never returns an error. Resolver failures
//! degrade to the unauthenticated state and are only logged.

use std::fmt;

/// Errors from fetching the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoamiError {
    /// The whoami URL is relative and there is no origin to resolve it against,
    /// or it does not parse at all.
    InvalidUrl { url: String, reason: String },
    /// The request failed before a response arrived.
    Transport { details: String },
    /// The response body could not be read or decoded.
    InvalidBody { details: String },
}

impl fmt::Display for WhoamiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl { url, reason } => {
                write!(f, "invalid whoami url '{url}': {reason}")
            }
            Self::Transport { details } => {
                write!(f, "whoami request failed: {details}")
            }
            Self::InvalidBody { details } => {
                write!(f, "invalid whoami response body: {details}")
            }
        }
    }
}

impl std::error::Error for WhoamiError {}

/// Errors from building the sign-out redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutError {
    /// The configured logout endpoint is empty.
    MissingLogoutUrl,
}

impl fmt::Display for SignOutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLogoutUrl => write!(f, "no SSO logout url configured"),
        }
    }
}

impl std::error::Error for SignOutError {}
