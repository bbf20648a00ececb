//! Admin sign-in with a derived password.
//!
//! Accounts provisioned from SSO never receive a password of their own; the
//! storage backend holds the one [`derive_deterministic_password`] gives for
//! their email. Signing in with it stores the admin record in the client's
//! auth slot, which the resolver then trusts when admin login is enabled.

use tracing::{info, instrument};
use training_hub_core::Result;
use training_hub_storage::{AuthRecord, StorageClient, StorageError};

use crate::password::{derive_deterministic_password, normalize_email};

/// Signs `email` in against the storage backend using its derived password.
///
/// The identity sent is the normalized email.
///
/// # Errors
///
/// Propagates the [`StorageError`] of the password sign-in.
#[instrument(skip(client))]
pub async fn sign_in_with_derived_password(
    client: &StorageClient,
    email: &str,
) -> Result<AuthRecord, StorageError> {
    let identity = normalize_email(email);
    let password = derive_deterministic_password(&identity);
    let record = client.auth_with_password(&identity, &password).await?;
    info!(record_id = %record.id, role = %record.role, "admin signed in");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use training_hub_storage::{AUTH_WITH_PASSWORD_PATH, AuthStore};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    async fn auth_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let expected = derive_deterministic_password("tester@abc.com");
        if body["identity"] == "tester@abc.com" && body["password"] == expected.as_str() {
            (
                StatusCode::OK,
                Json(json!({
                    "token": "admin-token",
                    "record": {
                        "id": "rec_admin",
                        "email": "tester@abc.com",
                        "role": "admin",
                        "collectionName": "users",
                        "collectionId": "_pb_users_auth_"
                    }
                })),
            )
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Failed to authenticate." })),
            )
        }
    }

    #[tokio::test]
    async fn signs_in_with_normalized_identity() {
        let base = serve(Router::new().route(AUTH_WITH_PASSWORD_PATH, post(auth_handler))).await;
        let client = StorageClient::new(&base, None);

        let record = sign_in_with_derived_password(&client, "  Tester@ABC.com ")
            .await
            .expect("sign in");

        assert_eq!(record.id, "rec_admin");
        assert_eq!(record.role, "admin");
        assert!(client.auth_store().is_valid());
        assert_eq!(client.auth_store().token().as_deref(), Some("admin-token"));
    }

    #[tokio::test]
    async fn rejected_credentials_leave_slot_empty() {
        let base = serve(Router::new().route(AUTH_WITH_PASSWORD_PATH, post(auth_handler))).await;
        let client = StorageClient::new(&base, None);

        let err = sign_in_with_derived_password(&client, "someone@else.com")
            .await
            .expect_err("rejected");

        assert!(format!("{err}").contains("400"));
        assert!(!client.auth_store().is_valid());
    }
}
