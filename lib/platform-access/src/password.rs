//! Deterministic password derivation for storage-backend accounts.
//!
//! SSO users get a storage-backend account whose password is derived from
//! their email, so the front-end can sign in without a provisioning round
//! trip. The prefix and suffix are shared with the backend provisioning job
//! and must match it byte for byte, or the account becomes unreachable.
//!
//! # Trust assumption
//!
//! The derived value is not a secret. Anyone who knows a user's email and
//! the two constants below can compute it. It is a bootstrap convenience,
//! and access control must not rest on it.

use sha2::{Digest, Sha256};

/// Prefix hashed in front of the normalized email.
pub const PASSWORD_HASH_PREFIX: &str = "training-hub-pb-auth:";

/// Literal appended to the hex digest.
pub const PASSWORD_SUFFIX: &str = "Zz9A";

/// Normalizes an SSO email for derivation and comparison: trimmed, lowercase.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Derives the storage-backend password for an SSO email.
///
/// `hex(sha256(PASSWORD_HASH_PREFIX + normalize_email(email))) + PASSWORD_SUFFIX`
#[must_use]
pub fn derive_deterministic_password(email: &str) -> String {
    let normalized = normalize_email(email);

    let mut hasher = Sha256::new();
    hasher.update(PASSWORD_HASH_PREFIX.as_bytes());
    hasher.update(normalized.as_bytes());

    format!("{}{PASSWORD_SUFFIX}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_email() {
        assert_eq!(normalize_email(" User@Example.COM  "), "user@example.com");
        assert_eq!(normalize_email("plain@example.com"), "plain@example.com");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn matches_backend_vectors() {
        assert_eq!(
            derive_deterministic_password("yasser.mohammad@ku.ac.ae"),
            "f9e6099d2ad0ceddcd872a11a99846c4ca3c399cd20f42d70f4a474aaec1bf9fZz9A"
        );
        assert_eq!(
            derive_deterministic_password("tester@abc.com"),
            "d51c6cd5efde3c8d7a030172182f6ef87502a312858f25eaf473ecdbf737f5abZz9A"
        );
        assert_eq!(
            derive_deterministic_password(" User@Example.COM  "),
            "7e561d62cfa4964146718c6a67d3cc8869a06e787acd7ca26e3381389a5f0d58Zz9A"
        );
    }

    #[test]
    fn output_format_is_hex_digest_plus_suffix() {
        let password = derive_deterministic_password("someone@example.com");
        assert_eq!(password.len(), 64 + PASSWORD_SUFFIX.len());
        assert!(password.ends_with(PASSWORD_SUFFIX));
        assert!(
            password[..64]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn equivalent_emails_share_a_password() {
        assert_eq!(
            derive_deterministic_password("Trainer@KU.ac.ae"),
            derive_deterministic_password("  trainer@ku.ac.ae")
        );
        assert_ne!(
            derive_deterministic_password("a@example.com"),
            derive_deterministic_password("b@example.com")
        );
    }
}
