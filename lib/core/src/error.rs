//! Shared `Result` alias for the training-hub workspace.
//!
//! Crates keep their own error enums (`StorageError`, `WhoamiError`, ...)
//! and return them wrapped in a rootcause [`Report`], so callers can attach
//! their own context on the way up.

use rootcause::Report;

/// Result whose error side is a rootcause report over context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
