//! `emailkit-preview` -- inspect a stored email structure.
//!
//! Loads an email structure JSON document, runs the same cleanup the
//! builder applies on load, and prints what the builder would show: the
//! authoring step reached, suggested layouts, composed rows with widths and
//! spacers, and audit findings.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default | Description                          |
//! |------------------------|----------|---------|--------------------------------------|
//! | `EMAIL_STRUCTURE_PATH` | no       | --      | JSON document to load (first CLI argument wins) |
//! | `PREVIEW_NORMALIZE`    | no       | `true`  | Clean up stale references before output |
//! | `PREVIEW_PRETTY`       | no       | `true`  | Pretty-print the JSON report         |

use emailkit_preview::config::PreviewConfig;
use emailkit_preview::report;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emailkit_preview=info,emailkit_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PreviewConfig::from_env().with_path_arg(std::env::args().nth(1));

    tracing::info!(
        path = ?config.structure_path,
        normalize = config.normalize,
        pretty = config.pretty,
        "Starting emailkit-preview",
    );

    match report::run(&config) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!(error = %e, "Preview failed");
            std::process::exit(1);
        }
    }
}
