//! Error types for the bundle check.

use std::fmt;
use std::path::PathBuf;

/// Errors that stop the scan before it can give a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleCheckError {
    /// The build output has no assets directory.
    AssetsMissing { path: PathBuf },
    /// An asset or the assets directory could not be read.
    ReadFailed { path: PathBuf, details: String },
}

impl fmt::Display for BundleCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetsMissing { path } => {
                write!(f, "build output not found: {}", path.display())
            }
            Self::ReadFailed { path, details } => {
                write!(f, "failed to read {}: {details}", path.display())
            }
        }
    }
}

impl std::error::Error for BundleCheckError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_missing_names_the_path() {
        let err = BundleCheckError::AssetsMissing {
            path: PathBuf::from("dist/assets"),
        };
        assert_eq!(err.to_string(), "build output not found: dist/assets");
    }
}
