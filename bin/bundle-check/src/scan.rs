//! Scanning built assets for embedded storage auth tokens.
//!
//! A storage auth token is a JWT whose payload carries `type: "auth"` plus
//! string `collectionId` and `id` claims. Any other JWT-shaped string (test
//! fixtures, third-party keys) is ignored.

use base64::Engine;
use regex::Regex;
use rootcause::prelude::Report;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

use crate::error::BundleCheckError;

/// Subdirectory of the build output holding the bundles.
pub const ASSETS_DIR: &str = "assets";

static JWT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+")
        .expect("Invalid regex pattern")
});

/// An auth token found in an asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Asset file name.
    pub file: String,
    /// First 16 and last 8 characters of the token.
    pub token_preview: String,
    /// Decoded token payload.
    pub payload: Value,
}

/// Decodes the payload segment of a JWT-shaped string.
#[must_use]
pub fn decode_payload(token: &str) -> Option<Value> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Returns true if `payload` describes a storage auth token.
#[must_use]
pub fn is_auth_payload(payload: &Value) -> bool {
    payload.get("type").and_then(Value::as_str) == Some("auth")
        && payload.get("collectionId").is_some_and(Value::is_string)
        && payload.get("id").is_some_and(Value::is_string)
}

/// Shortens a token to its first 16 and last 8 characters.
#[must_use]
pub fn token_preview(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let head: String = chars.iter().take(16).collect();
    let tail: String = chars[chars.len().saturating_sub(8)..].iter().collect();
    format!("{head}...{tail}")
}

/// Finds auth tokens in the contents of one asset.
#[must_use]
pub fn scan_source(file: &str, content: &str) -> Vec<Finding> {
    JWT_PATTERN
        .find_iter(content)
        .filter_map(|m| {
            let token = m.as_str();
            let payload = decode_payload(token)?;
            is_auth_payload(&payload).then(|| Finding {
                file: file.to_string(),
                token_preview: token_preview(token),
                payload,
            })
        })
        .collect()
}

/// Scans every `*.js` file directly under `<dist_dir>/assets`.
///
/// # Errors
///
/// Returns [`BundleCheckError::AssetsMissing`] if the assets directory does
/// not exist, or [`BundleCheckError::ReadFailed`] if it or a bundle cannot be
/// read.
pub fn scan_dist(dist_dir: &Path) -> Result<Vec<Finding>, Report<BundleCheckError>> {
    let assets = dist_dir.join(ASSETS_DIR);
    if !assets.is_dir() {
        return Err(BundleCheckError::AssetsMissing { path: assets }.into());
    }

    let read_failed = |path: &Path, e: std::io::Error| BundleCheckError::ReadFailed {
        path: path.to_path_buf(),
        details: e.to_string(),
    };

    let mut files: Vec<PathBuf> = fs::read_dir(&assets)
        .map_err(|e| read_failed(&assets, e))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "js"))
        .collect();
    files.sort();

    let mut findings = Vec::new();
    for path in files {
        let content = fs::read_to_string(&path).map_err(|e| read_failed(&path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let found = scan_source(&name, &content);
        debug!(file = %name, findings = found.len(), "scanned bundle");
        findings.extend(found);
    }
    Ok(findings)
}
