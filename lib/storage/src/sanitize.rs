//! Request URL sanitizing for the storage client.
//!
//! When the configured base URL accidentally carries the current SPA route,
//! the client builds request URLs like `/admin/training/new/api/collections/..`
//! which the backend answers with 404. [`sanitize_api_url`] cuts such paths
//! back to the first `/api` segment. It runs before every request, so it
//! must stay synchronous and free of I/O.

use regex::Regex;
use std::sync::LazyLock;
use training_hub_core::RuntimeOrigin;
use url::Url;

/// Base used to absolutize relative request URLs when no origin is known.
pub const FALLBACK_ORIGIN: &str = "http://127.0.0.1";

static API_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/api(?:/|$)").expect("static regex is valid"));

/// Outcome of sanitizing a request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedUrl {
    /// The URL to send.
    pub url: String,
    /// True when a route prefix in front of `/api` was removed.
    pub rewritten: bool,
}

impl SanitizedUrl {
    fn unchanged(url: String) -> Self {
        Self {
            url,
            rewritten: false,
        }
    }
}

/// Rewrites a route-prefixed API URL to its root-relative `/api/...` form.
///
/// Relative inputs are absolutized against `runtime_origin`, or against
/// [`FALLBACK_ORIGIN`]. Unparsable inputs are returned untouched.
#[must_use]
pub fn sanitize_api_url(url: &str, runtime_origin: Option<&RuntimeOrigin>) -> SanitizedUrl {
    let base = runtime_origin.map_or(FALLBACK_ORIGIN, RuntimeOrigin::as_str);

    let Ok(mut parsed) = Url::parse(base).and_then(|b| b.join(url)) else {
        return SanitizedUrl::unchanged(url.to_string());
    };

    let start = match API_SEGMENT.find(parsed.path()) {
        Some(segment) if segment.start() > 0 => segment.start(),
        _ => return SanitizedUrl::unchanged(parsed.into()),
    };

    let api_path = parsed.path()[start..].to_string();
    parsed.set_path(&api_path);

    SanitizedUrl {
        url: parsed.into(),
        rewritten: true,
    }
}
