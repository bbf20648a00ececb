//! Base URL resolution for the storage client.
//!
//! The configured base URL may be empty, relative (`/`, `/api`, `pb`), or
//! absolute. Resolution walks [`BASE_URL_STRATEGIES`] in order and takes the
//! first strategy that yields a value; if none does, the base is `/`.

use training_hub_core::RuntimeOrigin;
use url::Url;

/// A single base-URL resolution step.
///
/// Receives the trimmed configured value and the runtime origin, if any.
/// Returns `None` when the step does not apply.
pub type BaseUrlStrategy = fn(&str, Option<&RuntimeOrigin>) -> Option<String>;

/// Resolution steps in precedence order.
pub const BASE_URL_STRATEGIES: &[(&str, BaseUrlStrategy)] = &[
    ("absolute", absolute),
    ("relative_to_origin", relative_to_origin),
    ("verbatim", verbatim),
    ("origin", origin_only),
];

/// Last-resort base when nothing else applies.
pub const FALLBACK_BASE_URL: &str = "/";

/// Resolves the configured storage base URL to its canonical form.
///
/// The result is never empty.
#[must_use]
pub fn resolve_base_url(raw_value: &str, runtime_origin: Option<&RuntimeOrigin>) -> String {
    let normalized = raw_value.trim();

    BASE_URL_STRATEGIES
        .iter()
        .find_map(|(_, strategy)| strategy(normalized, runtime_origin))
        .unwrap_or_else(|| FALLBACK_BASE_URL.to_string())
}

/// `http://` or `https://` values are taken as-is, minus trailing slashes.
pub fn absolute(value: &str, _origin: Option<&RuntimeOrigin>) -> Option<String> {
    is_absolute_http(value).then(|| trim_trailing_slashes(value).to_string())
}

/// Relative values are joined onto the origin; a bare `/api` collapses to `/`.
pub fn relative_to_origin(value: &str, origin: Option<&RuntimeOrigin>) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let origin = origin?;

    let base = Url::parse(&format!("{}/", trim_trailing_slashes(origin.as_str()))).ok()?;
    let mut resolved = base.join(value).ok()?;
    if matches!(resolved.path(), "/api" | "/api/") {
        resolved.set_path("/");
    }

    Some(trim_trailing_slashes(resolved.as_str()).to_string())
}

/// Without an origin a non-empty value cannot be resolved and is kept.
pub fn verbatim(value: &str, _origin: Option<&RuntimeOrigin>) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// An empty value falls back to the origin itself.
pub fn origin_only(value: &str, origin: Option<&RuntimeOrigin>) -> Option<String> {
    if !value.is_empty() {
        return None;
    }
    origin.map(|o| trim_trailing_slashes(o.as_str()).to_string())
}

fn is_absolute_http(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn trim_trailing_slashes(value: &str) -> &str {
    value.trim_end_matches('/')
}
