//! The application's runtime origin.
//!
//! In the browser the origin comes from `window.location.origin`. Outside a
//! browser there is no ambient location, so the origin is configured and
//! passed explicitly; `Option<&RuntimeOrigin>` means "no origin known".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Error returned when a string is not a usable origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOriginError {
    /// The rejected input.
    pub input: String,
    /// Why it was rejected.
    pub reason: String,
}

impl fmt::Display for ParseOriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid origin '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for ParseOriginError {}

/// Scheme + host (+ non-default port) of the running application.
///
/// Stored in the serialized `scheme://host[:port]` form, without a path or
/// trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuntimeOrigin(String);

impl RuntimeOrigin {
    /// Returns the origin, e.g. `https://training-hub.example.com`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the application root (`origin + "/"`).
    #[must_use]
    pub fn root(&self) -> String {
        format!("{}/", self.0)
    }
}

impl fmt::Display for RuntimeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RuntimeOrigin {
    type Err = ParseOriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = |reason: &str| ParseOriginError {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(s.trim()).map_err(|e| reject(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(reject("scheme must be http or https"));
        }
        if url.host_str().is_none() {
            return Err(reject("missing host"));
        }

        Ok(Self(url.origin().ascii_serialization()))
    }
}

impl TryFrom<String> for RuntimeOrigin {
    type Error = ParseOriginError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RuntimeOrigin> for String {
    fn from(origin: RuntimeOrigin) -> Self {
        origin.0
    }
}
