//! Record-storage client plumbing for training-hub.
//!
//! This crate provides:
//! - Base URL resolution for the storage backend ([`resolve_base_url`])
//! - Request URL sanitizing for route-prefixed API calls ([`sanitize_api_url`])
//! - The auth slot the client keeps its bearer token in ([`AuthStore`])
//! - A thin [`StorageClient`] that applies both on every request
//!
//! # Example
//!
//! ```
//! use training_hub_core::RuntimeOrigin;
//! use training_hub_storage::{StorageClient, resolve_base_url, sanitize_api_url};
//!
//! let origin: RuntimeOrigin = "https://training-hub.example.com".parse().unwrap();
//!
//! assert_eq!(resolve_base_url("/api", Some(&origin)), "https://training-hub.example.com");
//!
//! let fixed = sanitize_api_url(
//!     "https://training-hub.example.com/admin/api/collections/trainings/records",
//!     Some(&origin),
//! );
//! assert!(fixed.rewritten);
//!
//! let client = StorageClient::new("", Some(origin));
//! assert_eq!(client.base_url(), "https://training-hub.example.com");
//! ```

pub mod auth_store;
pub mod base_url;
pub mod client;
pub mod error;
pub mod sanitize;

pub use auth_store::{
    AuthRecord, AuthStore, MemoryAuthStore, USERS_COLLECTION_ID, USERS_COLLECTION_NAME,
};
pub use base_url::{BASE_URL_STRATEGIES, BaseUrlStrategy, resolve_base_url};
pub use client::{AUTH_WITH_PASSWORD_PATH, AuthResponse, StorageClient};
pub use error::StorageError;
pub use sanitize::{SanitizedUrl, sanitize_api_url};
