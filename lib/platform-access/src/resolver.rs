//! Auth-state resolution.
//!
//! Decides whether the caller is an administrator, a regular user or
//! anonymous, and keeps the storage client's auth slot in line with that
//! answer. One call makes at most one request and never retries; the caller
//! decides when to resolve again.

use serde::Serialize;
use tracing::{debug, error, instrument, warn};
use training_hub_storage::AuthStore;

use crate::user::{SsoUser, WhoamiResponse};
use crate::whoami::WhoamiFetcher;

/// Inputs of a single resolution.
#[derive(Clone, Copy)]
pub struct ResolveParams<'a> {
    /// Identity endpoint, absolute or relative to the app origin.
    pub whoami_url: &'a str,
    /// Trust a valid record already in the auth slot (admin sign-in).
    pub enable_admin_login: bool,
    /// How to reach the identity endpoint.
    pub fetcher: &'a dyn WhoamiFetcher,
    /// The storage client's auth slot.
    pub store: &'a dyn AuthStore,
}

/// Outcome of a resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAuth {
    pub user: Option<SsoUser>,
    pub is_admin: bool,
}

impl ResolvedAuth {
    /// Nobody is signed in.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    fn for_user(user: SsoUser) -> Self {
        let is_admin = user.is_admin();
        Self {
            user: Some(user),
            is_admin,
        }
    }

    /// Returns true if a user was resolved.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Resolves the current auth state.
///
/// - With `enable_admin_login` and a valid record in the slot, the record is
///   trusted as-is and nothing is fetched or written.
/// - Otherwise the identity endpoint is fetched. A 2xx answer carrying a
///   storage token saves that token into the slot; every other outcome
///   (non-2xx, no token, transport or decode failure) clears it.
///
/// On the fetch path the slot is valid exactly when a user is returned.
#[instrument(skip(params), fields(whoami_url = %params.whoami_url))]
pub async fn resolve_auth_state(params: ResolveParams<'_>) -> ResolvedAuth {
    let store = params.store;

    if params.enable_admin_login && store.is_valid() {
        if let Some(record) = store.record() {
            debug!(record_id = %record.id, "using stored admin sign-in");
            return ResolvedAuth::for_user(SsoUser::from_auth_record(&record));
        }
    }

    let reply = match params.fetcher.fetch(params.whoami_url).await {
        Ok(reply) => reply,
        Err(report) => {
            error!(error = %report, "failed to resolve auth state from whoami");
            store.clear();
            return ResolvedAuth::unauthenticated();
        }
    };

    if !reply.is_success() {
        debug!(status = reply.status, "whoami did not authenticate the caller");
        store.clear();
        return ResolvedAuth::unauthenticated();
    }

    let response: WhoamiResponse = match serde_json::from_slice(&reply.body) {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "failed to decode whoami response");
            store.clear();
            return ResolvedAuth::unauthenticated();
        }
    };

    let Some(token) = response.storage_token() else {
        warn!("missing pbToken in whoami response; user will remain unauthenticated");
        store.clear();
        return ResolvedAuth::unauthenticated();
    };

    store.save(token, response.to_auth_record());
    let resolved = ResolvedAuth::for_user(response.to_user());
    debug!(is_admin = resolved.is_admin, "resolved sso user");
    resolved
}
