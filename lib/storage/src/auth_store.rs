//! The storage client's auth slot.
//!
//! The slot holds the bearer token the storage backend issued (or that the
//! identity endpoint handed over) together with the auth record it belongs
//! to. It is owned by the [`StorageClient`](crate::StorageClient) and handed
//! out by reference to whoever needs to read or update it.

use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};

/// Collection name of the backend's user auth collection.
pub const USERS_COLLECTION_NAME: &str = "users";

/// Collection id of the backend's built-in user auth collection.
pub const USERS_COLLECTION_ID: &str = "_pb_users_auth_";

/// Auth record in the shape the storage backend's auth model expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    #[serde(default = "default_collection_id")]
    pub collection_id: String,
}

fn default_collection_name() -> String {
    USERS_COLLECTION_NAME.to_string()
}

fn default_collection_id() -> String {
    USERS_COLLECTION_ID.to_string()
}

impl AuthRecord {
    /// Creates a record in the users collection with empty profile fields.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: String::new(),
            name: String::new(),
            role: String::new(),
            uid: String::new(),
            collection_name: default_collection_name(),
            collection_id: default_collection_id(),
        }
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the SSO uid.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }
}

/// Capability interface over the auth slot.
///
/// `is_valid` must be true iff a non-empty token was saved most recently and
/// the slot has not been cleared since.
pub trait AuthStore: Send + Sync {
    /// Returns true if the slot holds a usable token.
    fn is_valid(&self) -> bool;

    /// Returns the stored token, if any.
    fn token(&self) -> Option<String>;

    /// Returns the stored auth record, if any.
    fn record(&self) -> Option<AuthRecord>;

    /// Stores a token and its record, replacing whatever was there.
    fn save(&self, token: &str, record: AuthRecord);

    /// Empties the slot.
    fn clear(&self);
}

#[derive(Debug, Default)]
struct Slot {
    token: String,
    record: Option<AuthRecord>,
}

/// In-process auth slot.
#[derive(Debug, Default)]
pub struct MemoryAuthStore {
    slot: RwLock<Slot>,
}

impl MemoryAuthStore {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthStore for MemoryAuthStore {
    fn is_valid(&self) -> bool {
        !self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .is_empty()
    }

    fn token(&self) -> Option<String> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        (!slot.token.is_empty()).then(|| slot.token.clone())
    }

    fn record(&self) -> Option<AuthRecord> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .record
            .clone()
    }

    fn save(&self, token: &str, record: AuthRecord) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.token = token.to_string();
        slot.record = Some(record);
    }

    fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Slot::default();
    }
}
