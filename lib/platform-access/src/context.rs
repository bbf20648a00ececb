//! Process-wide auth context.
//!
//! [`AuthContext::mount`] resolves the auth state once in the background and
//! publishes it through a watch channel. Readers see `is_loading` until the
//! resolution lands. Unmounting cancels the context: a resolution that
//! finishes afterwards is dropped, though the request itself is not aborted.
//!
//! No timeout is applied to the whoami request. If it hangs, the context
//! stays loading.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use training_hub_core::{Result, RuntimeOrigin};
use training_hub_storage::AuthStore;

use crate::error::SignOutError;
use crate::resolver::{ResolveParams, resolve_auth_state};
use crate::sign_out::SignOutRedirect;
use crate::user::SsoUser;
use crate::whoami::WhoamiFetcher;

/// What the application sees of the auth state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user: Option<SsoUser>,
    pub is_loading: bool,
    pub is_admin: bool,
}

impl AuthSnapshot {
    /// State before the first resolution has finished.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
            is_admin: false,
        }
    }
}

/// Everything the context needs to resolve and sign out.
#[derive(Clone)]
pub struct AuthContextParams {
    pub whoami_url: String,
    pub enable_admin_login: bool,
    pub sso_logout_url: String,
    pub origin: Option<RuntimeOrigin>,
    pub fetcher: Arc<dyn WhoamiFetcher>,
    pub store: Arc<dyn AuthStore>,
}

/// Handle on the mounted auth context.
pub struct AuthContext {
    state: watch::Receiver<AuthSnapshot>,
    cancel: CancellationToken,
    store: Arc<dyn AuthStore>,
    sso_logout_url: String,
    origin: Option<RuntimeOrigin>,
}

impl AuthContext {
    /// Mounts the context and starts the one-off resolution.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn mount(params: AuthContextParams) -> Self {
        let (tx, rx) = watch::channel(AuthSnapshot::loading());
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        let fetcher = params.fetcher;
        let store = Arc::clone(&params.store);
        let whoami_url = params.whoami_url;
        let enable_admin_login = params.enable_admin_login;

        tokio::spawn(async move {
            if task_cancel.is_cancelled() {
                return;
            }

            let resolved = resolve_auth_state(ResolveParams {
                whoami_url: &whoami_url,
                enable_admin_login,
                fetcher: fetcher.as_ref(),
                store: store.as_ref(),
            })
            .await;

            if task_cancel.is_cancelled() {
                debug!("auth context unmounted before resolution finished; dropping result");
                return;
            }

            tx.send_replace(AuthSnapshot {
                user: resolved.user,
                is_loading: false,
                is_admin: resolved.is_admin,
            });
        });

        Self {
            state: rx,
            cancel,
            store: params.store,
            sso_logout_url: params.sso_logout_url,
            origin: params.origin,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    /// Returns the signed-in user, if resolved.
    #[must_use]
    pub fn user(&self) -> Option<SsoUser> {
        self.state.borrow().user.clone()
    }

    /// Returns true until the first resolution has been published.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Returns true if the resolved user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin
    }

    /// Returns a receiver that observes every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.clone()
    }

    /// Waits until loading has finished and returns that state.
    ///
    /// If the context was unmounted first, returns the last published state,
    /// which is still loading.
    pub async fn loaded(&self) -> AuthSnapshot {
        let mut rx = self.state.clone();
        if rx.wait_for(|s| !s.is_loading).await.is_err() {
            debug!("auth context closed while loading");
        }
        let snapshot = rx.borrow().clone();
        snapshot
    }

    /// Returns true once the context has been unmounted.
    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Unmounts the context; a pending resolution will not be published.
    pub fn unmount(&self) {
        self.cancel.cancel();
    }

    /// Clears the local storage sign-in and returns the SSO logout redirect.
    ///
    /// The published state is left alone: the caller is expected to navigate
    /// away, which tears the whole application down.
    ///
    /// # Errors
    ///
    /// Returns [`SignOutError::MissingLogoutUrl`] if no logout URL is configured.
    pub fn sign_out(&self) -> Result<SignOutRedirect, SignOutError> {
        if self.store.is_valid() {
            self.store.clear();
        }
        let redirect = SignOutRedirect::new(&self.sso_logout_url, self.origin.as_ref())?;
        info!(location = %redirect, "signing out via sso logout");
        Ok(redirect)
    }
}

impl Drop for AuthContext {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("state", &*self.state.borrow())
            .field("unmounted", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WhoamiError;
    use crate::whoami::WhoamiReply;
    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;
    use training_hub_storage::{AuthRecord, MemoryAuthStore};

    /// Fetcher that waits for a go signal before answering.
    struct GatedFetcher {
        gate: Arc<Notify>,
        reply: WhoamiReply,
    }

    #[async_trait]
    impl WhoamiFetcher for GatedFetcher {
        async fn fetch(&self, _whoami_url: &str) -> Result<WhoamiReply, WhoamiError> {
            self.gate.notified().await;
            Ok(self.reply.clone())
        }
    }

    fn admin_reply() -> WhoamiReply {
        WhoamiReply::json(
            200,
            &json!({
                "email": "admin@example.com",
                "role": "admin",
                "pbToken": "tok"
            }),
        )
    }

    fn params(fetcher: GatedFetcher, store: Arc<MemoryAuthStore>) -> AuthContextParams {
        AuthContextParams {
            whoami_url: "/whoami".to_string(),
            enable_admin_login: false,
            sso_logout_url: "/mellon/logout".to_string(),
            origin: Some("https://training-hub.ku.ac.ae".parse().expect("origin")),
            fetcher: Arc::new(fetcher),
            store,
        }
    }

    #[tokio::test]
    async fn starts_loading_then_publishes_resolution() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(MemoryAuthStore::new());
        let context = AuthContext::mount(params(
            GatedFetcher {
                gate: Arc::clone(&gate),
                reply: admin_reply(),
            },
            Arc::clone(&store),
        ));

        assert_eq!(context.snapshot(), AuthSnapshot::loading());

        gate.notify_one();
        let loaded = context.loaded().await;

        assert!(!loaded.is_loading);
        assert!(loaded.is_admin);
        assert_eq!(
            context.user().and_then(|u| u.email),
            Some("admin@example.com".to_string())
        );
        assert!(store.is_valid());
    }

    #[tokio::test]
    async fn unmounted_context_drops_late_result() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(MemoryAuthStore::new());
        let context = AuthContext::mount(params(
            GatedFetcher {
                gate: Arc::clone(&gate),
                reply: admin_reply(),
            },
            store,
        ));
        let mut updates = context.subscribe();

        context.unmount();
        gate.notify_one();

        // The task ends without publishing, which closes the channel.
        assert!(updates.changed().await.is_err());
        assert!(context.is_unmounted());
        assert!(context.is_loading());
        assert!(context.loaded().await.is_loading);
    }

    #[tokio::test]
    async fn sign_out_clears_slot_and_builds_redirect() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(MemoryAuthStore::new());
        store.save("admin-token", AuthRecord::new("rec_admin").with_role("admin"));
        let context = AuthContext::mount(params(
            GatedFetcher {
                gate,
                reply: WhoamiReply::empty(401),
            },
            Arc::clone(&store),
        ));

        let redirect = context.sign_out().expect("redirect");

        assert!(!store.is_valid());
        assert_eq!(
            redirect.location(),
            "/mellon/logout?ReturnTo=https%3A%2F%2Ftraining-hub.ku.ac.ae%2F"
        );
    }
}
