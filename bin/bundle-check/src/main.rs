//! Build gate: fails if a storage auth token is embedded in the built bundle.
//!
//! Exits 1 when a token is found or the build output is missing, 0 otherwise.

mod error;
mod scan;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Check built frontend assets for embedded storage auth tokens.
#[derive(Parser)]
#[command(name = "training-hub-bundle-check", long_about = None)]
struct Cli {
    /// Build output directory containing `assets/`.
    #[arg(default_value = "dist")]
    dist_dir: PathBuf,
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let findings = match scan::scan_dist(&cli.dist_dir) {
        Ok(findings) => findings,
        Err(report) => {
            eprintln!("{report}");
            return ExitCode::FAILURE;
        }
    };

    if findings.is_empty() {
        println!("Security check passed: no embedded storage auth tokens found in dist assets.");
        return ExitCode::SUCCESS;
    }

    eprintln!("Security check failed: embedded storage auth token(s) detected in built bundle.");
    for finding in &findings {
        eprintln!("- {}: {}", finding.file, finding.token_preview);
        eprintln!("  payload: {}", finding.payload);
    }
    ExitCode::FAILURE
}
