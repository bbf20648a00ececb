//! SSO identity types.
//!
//! [`WhoamiResponse`] is the body of the identity endpoint. [`SsoUser`] is
//! the identity the rest of the application sees once resolution succeeded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use training_hub_storage::AuthRecord;

use crate::role::RoleSet;

/// The signed-in SSO user as exposed to the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl SsoUser {
    /// Returns the user's roles as a [`RoleSet`].
    #[must_use]
    pub fn role_set(&self) -> RoleSet {
        RoleSet::from_names(&self.roles)
    }

    /// Returns true if the user holds the `admin` role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role_set().is_admin()
    }

    /// Rebuilds the user from a stored auth record.
    ///
    /// The record only carries a single role, which becomes the role list.
    #[must_use]
    pub fn from_auth_record(record: &AuthRecord) -> Self {
        let roles = RoleSet::single(Some(record.role.as_str()));
        Self {
            id: non_empty(&record.id),
            email: non_empty(&record.email),
            name: non_empty(&record.name),
            role: non_empty(&record.role),
            roles: roles.names(),
            uid: None,
        }
    }
}

/// Body of the identity ("whoami") endpoint.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoamiResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub uid: Option<String>,
    /// Bearer token for the storage backend, once the account is provisioned.
    #[serde(default)]
    pub pb_token: Option<String>,
    /// Expiry of `pb_token`, as sent (ISO-8601).
    #[serde(default)]
    pub pb_auth_expires_at: Option<String>,
}

impl WhoamiResponse {
    /// Returns the storage token if it is present and non-empty.
    #[must_use]
    pub fn storage_token(&self) -> Option<&str> {
        self.pb_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Parses `pbAuthExpiresAt`; `None` if absent or malformed.
    #[must_use]
    pub fn auth_expires_at(&self) -> Option<DateTime<Utc>> {
        self.pb_auth_expires_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Role set: `roles[]` when sent, otherwise the single `role`.
    #[must_use]
    pub fn role_set(&self) -> RoleSet {
        match &self.roles {
            Some(roles) => RoleSet::from_names(roles),
            None => RoleSet::single(self.role.as_deref()),
        }
    }

    /// The application-facing user for this response.
    #[must_use]
    pub fn to_user(&self) -> SsoUser {
        SsoUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
            roles: self.role_set().names(),
            uid: self.uid.clone(),
        }
    }

    /// The auth record the storage backend's auth model expects.
    ///
    /// Missing values become empty strings, `name` falls back to `email`,
    /// and `role` falls back to `user`.
    #[must_use]
    pub fn to_auth_record(&self) -> AuthRecord {
        let email = first_non_empty([self.email.as_deref()]).unwrap_or_default();
        let name = first_non_empty([self.name.as_deref(), self.email.as_deref()]).unwrap_or_default();
        let role = first_non_empty([self.role.as_deref()]).unwrap_or("user");

        AuthRecord::new(first_non_empty([self.id.as_deref()]).unwrap_or_default())
            .with_email(email)
            .with_name(name)
            .with_role(role)
            .with_uid(first_non_empty([self.uid.as_deref()]).unwrap_or_default())
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_response() -> WhoamiResponse {
        serde_json::from_str(
            r#"{
                "id": "user-1",
                "email": "admin@example.com",
                "name": "Admin User",
                "role": "admin",
                "uid": "uid-1",
                "pbToken": "user-token",
                "pbAuthExpiresAt": "2026-02-11T00:00:00Z"
            }"#,
        )
        .expect("deserialize")
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let response = full_response();
        assert_eq!(response.storage_token(), Some("user-token"));
        assert_eq!(response.uid.as_deref(), Some("uid-1"));
        assert!(response.roles.is_none());
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let response = WhoamiResponse {
            pb_token: Some(String::new()),
            ..WhoamiResponse::default()
        };
        assert!(response.storage_token().is_none());
    }

    #[test]
    fn expiry_parses_or_is_ignored() {
        let response = full_response();
        let expires = response.auth_expires_at().expect("expiry");
        assert_eq!(expires.to_rfc3339(), "2026-02-11T00:00:00+00:00");

        let response = WhoamiResponse {
            pb_auth_expires_at: Some("next tuesday".to_string()),
            ..WhoamiResponse::default()
        };
        assert!(response.auth_expires_at().is_none());
    }

    #[test]
    fn roles_list_wins_over_single_role() {
        let response = WhoamiResponse {
            role: Some("user".to_string()),
            roles: Some(vec!["user".to_string(), "admin".to_string()]),
            ..WhoamiResponse::default()
        };
        assert!(response.role_set().is_admin());
        assert_eq!(response.to_user().roles, vec!["user", "admin"]);
    }

    #[test]
    fn single_role_is_wrapped() {
        let user = full_response().to_user();
        assert_eq!(user.roles, vec!["admin"]);
        assert!(user.is_admin());
    }

    #[test]
    fn auth_record_applies_fallbacks() {
        let response = WhoamiResponse {
            email: Some("trainee@example.com".to_string()),
            ..WhoamiResponse::default()
        };
        let record = response.to_auth_record();

        assert_eq!(record.id, "");
        assert_eq!(record.name, "trainee@example.com");
        assert_eq!(record.role, "user");
        assert_eq!(record.uid, "");
        assert_eq!(record.collection_name, "users");
        assert_eq!(record.collection_id, "_pb_users_auth_");
    }

    #[test]
    fn auth_record_keeps_sent_values() {
        let record = full_response().to_auth_record();
        assert_eq!(record.id, "user-1");
        assert_eq!(record.name, "Admin User");
        assert_eq!(record.role, "admin");
        assert_eq!(record.uid, "uid-1");
    }

    #[test]
    fn user_from_record_wraps_role() {
        let record = AuthRecord::new("rec_1")
            .with_email("admin@example.com")
            .with_role("admin");
        let user = SsoUser::from_auth_record(&record);

        assert_eq!(user.id.as_deref(), Some("rec_1"));
        assert!(user.name.is_none());
        assert_eq!(user.roles, vec!["admin"]);
        assert!(user.is_admin());

        let user = SsoUser::from_auth_record(&AuthRecord::new("rec_2"));
        assert!(user.roles.is_empty());
        assert!(!user.is_admin());
    }
}
