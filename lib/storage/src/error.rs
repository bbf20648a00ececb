//! Error types for the storage crate.
//!
//! Returned wrapped in a rootcause `Report` so callers can add their own
//! context (which collection, which user) as the error propagates.

use std::fmt;

/// Errors from storage backend requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The request never produced a response.
    Transport { details: String },
    /// The backend answered with a non-success status.
    RequestRejected { status: u16, details: String },
    /// The backend answered 2xx with a body that could not be decoded.
    InvalidResponse { details: String },
    /// A request URL could not be built.
    InvalidUrl { url: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { details } => {
                write!(f, "storage request failed: {details}")
            }
            Self::RequestRejected { status, details } => {
                write!(f, "storage backend rejected request ({status}): {details}")
            }
            Self::InvalidResponse { details } => {
                write!(f, "invalid storage response: {details}")
            }
            Self::InvalidUrl { url } => {
                write!(f, "invalid storage request url: {url}")
            }
        }
    }
}

impl std::error::Error for StorageError {}
