//! `talkgen`: per-talk TeX definitions from a conference's event API.
//!
//! Loads the event list (live from the API or replayed from the last
//! snapshot), keeps talks that are `unconfirmed` or `confirmed`, and writes
//! one directory per talk under the output root with a `def.tex` file and
//! any speaker photos and logo.
//!
//! # Architecture
//!
//! ```text
//! EventSource::load --> decode --> eligible_events --> RecordGenerator (per talk)
//! ```
//!
//! Talks are generated one at a time. A talk that fails is logged and
//! skipped; the process exits non-zero at the end if any did.

mod config;
mod error;
mod pipeline;
mod prompt;

use anyhow::Context;
use talkgen_core::{HttpAssetFetcher, RecordGenerator};
use talkgen_source::open_source;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::pipeline::generate_all;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// loads events from the configured source, then generates every eligible
/// talk in order.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the event source fails,
/// or at least one eligible talk could not be generated.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("talkgen starting");

    let config = AppConfig::from_env()?;
    info!(
        base_url = config.base_url,
        events_url = config.source.events_url,
        output_dir = %config.output_dir.display(),
        interactive = config.interactive,
        "configuration loaded"
    );

    let mut source = open_source(&config.source, Box::new(config.credentials()))
        .context("failed to set up the event source")?;
    let raw = source
        .load()
        .await
        .with_context(|| format!("failed to load events from the {} source", source.name()))?;

    let fetcher = HttpAssetFetcher::new(config.http_timeout)
        .context("failed to build the asset HTTP client")?;
    let generator = RecordGenerator::new(fetcher, config.base_url.clone(), config.output_dir.clone());

    let report = generate_all(raw, &generator).await;
    info!(
        received = report.received,
        malformed = report.malformed,
        ineligible = report.ineligible,
        generated = report.generated,
        failed = report.failed,
        output_dir = %generator.output_root().display(),
        "run complete"
    );

    if report.failed > 0 {
        anyhow::bail!(
            "{} of {} eligible events failed",
            report.failed,
            report.eligible()
        );
    }
    Ok(())
}
