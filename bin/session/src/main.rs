//! Resolves the training-hub auth state once and prints it as JSON.
//!
//! The SSO session cookie is taken from `TRAINING_HUB__AUTH__SESSION_COOKIE`.

mod config;

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use training_hub_platform_access::{
    AuthContext, AuthContextParams, AuthSnapshot, ReqwestWhoamiFetcher,
    sign_in_with_derived_password,
};
use training_hub_storage::StorageClient;

use crate::config::AppConfig;

/// Resolve the training-hub auth state for an SSO session.
#[derive(Parser)]
#[command(name = "training-hub-session", long_about = None)]
struct Cli {
    /// Sign this admin in with their derived password before resolving.
    #[arg(long, value_name = "EMAIL")]
    admin_email: Option<String>,

    /// Also sign out and print the SSO logout redirect.
    #[arg(long)]
    sign_out: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    auth: AuthSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    sign_out_location: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(origin = ?config.app_origin, "Loaded configuration");

    let storage = StorageClient::new(&config.storage.base_url, config.app_origin.clone());
    tracing::info!(base_url = storage.base_url(), "Storage client ready");

    if let Some(email) = &cli.admin_email {
        if let Err(report) = sign_in_with_derived_password(&storage, email).await {
            tracing::error!(error = %report, "Admin sign-in failed");
            return ExitCode::FAILURE;
        }
    }

    let fetcher = ReqwestWhoamiFetcher::new(config.app_origin.clone())
        .with_cookie(config.auth.session_cookie().map(str::to_string));

    let context = AuthContext::mount(AuthContextParams {
        whoami_url: config.auth.whoami_url().to_string(),
        enable_admin_login: config.auth.enable_admin_login(),
        sso_logout_url: config.auth.sso_logout_url().to_string(),
        origin: config.app_origin.clone(),
        fetcher: Arc::new(fetcher),
        store: storage.auth_store().clone(),
    });
    let auth = context.loaded().await;

    let sign_out_location = if cli.sign_out {
        match context.sign_out() {
            Ok(redirect) => Some(redirect.location().to_string()),
            Err(report) => {
                tracing::error!(error = %report, "Sign-out failed");
                return ExitCode::FAILURE;
            }
        }
    } else {
        None
    };

    let output = Output {
        auth,
        sign_out_location,
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode output");
            ExitCode::FAILURE
        }
    }
}
