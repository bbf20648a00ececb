//! Core types and utilities for the training-hub access layer.
//!
//! This crate provides the `Result` alias used across the workspace and the
//! [`RuntimeOrigin`] type that stands in for the browser's `window.location`
//! when resolving relative URLs.

pub mod error;
pub mod origin;

pub use error::Result;
pub use origin::{ParseOriginError, RuntimeOrigin};
