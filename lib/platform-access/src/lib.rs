//! SSO auth-state resolution for training-hub.
//!
//! This crate provides:
//! - Deterministic password derivation for SSO-provisioned accounts
//! - Role handling (`Role`, `RoleSet`)
//! - The identity endpoint client (`WhoamiFetcher`)
//! - Auth-state resolution (`resolve_auth_state`)
//! - The process-wide auth context (`AuthContext`) and sign-out
//!
//! # Access Model
//!
//! Identity comes from the SSO front door: the `whoami` endpoint answers with
//! the caller's profile and, when they may use the record store, a storage
//! token. Administrators can alternatively sign in against the record store
//! directly; with admin login enabled that stored sign-in wins.
//!
//! # Example
//!
//! ```
//! use training_hub_core::RuntimeOrigin;
//! use training_hub_platform_access::{
//!     RoleSet, SignOutRedirect, derive_deterministic_password, normalize_email,
//! };
//!
//! assert_eq!(normalize_email(" Tester@ABC.com "), "tester@abc.com");
//! assert!(derive_deterministic_password("tester@abc.com").ends_with("Zz9A"));
//!
//! let roles = RoleSet::from_names(&["user", "admin"]);
//! assert!(roles.is_admin());
//!
//! let origin: RuntimeOrigin = "https://training-hub.example.com".parse().unwrap();
//! let redirect = SignOutRedirect::new("/mellon/logout", Some(&origin)).unwrap();
//! assert_eq!(
//!     redirect.location(),
//!     "/mellon/logout?ReturnTo=https%3A%2F%2Ftraining-hub.example.com%2F"
//! );
//! ```

pub mod admin;
pub mod config;
pub mod context;
pub mod error;
pub mod password;
pub mod resolver;
pub mod role;
pub mod sign_out;
pub mod user;
pub mod whoami;

// Re-export main types at crate root
pub use admin::sign_in_with_derived_password;
pub use config::AuthConfig;
pub use context::{AuthContext, AuthContextParams, AuthSnapshot};
pub use error::{SignOutError, WhoamiError};
pub use password::{
    PASSWORD_HASH_PREFIX, PASSWORD_SUFFIX, derive_deterministic_password, normalize_email,
};
pub use resolver::{ResolveParams, ResolvedAuth, resolve_auth_state};
pub use role::{Role, RoleSet};
pub use sign_out::{RETURN_TO_PARAM, SignOutRedirect};
pub use user::{SsoUser, WhoamiResponse};
pub use whoami::{ReqwestWhoamiFetcher, WhoamiFetcher, WhoamiReply};
