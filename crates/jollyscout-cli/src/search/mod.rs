//! The `search` command: one full crawl-and-score run for a destination.

pub mod pipeline;

use std::path::PathBuf;

use anyhow::Context;

use jollyscout_core::{AppConfig, Roster, SearchQuery};
use jollyscout_scraper::{ChromiumSession, SearchTuning, SessionConfig};

use crate::output;

/// Acquire a browser session, run the pipeline, release the session, and
/// write the output artifacts.
///
/// The session is released on every exit path; a fatal flow error leaves
/// no output files behind.
///
/// # Errors
///
/// Returns an error when the browser cannot be launched, the search flow
/// fails fatally, or the artifacts cannot be written.
pub async fn run_search(
    config: &AppConfig,
    roster: &Roster,
    query: SearchQuery,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let session_config = SessionConfig::for_run(config, roster);
    tracing::info!(
        destination = %query.destination,
        headless = session_config.headless,
        proxied = session_config.proxy.is_some(),
        "launching browser session"
    );

    let session = ChromiumSession::launch(&session_config)
        .await
        .context("launching browser session")?;

    // Keep the outcome unexamined until the session is released.
    let outcome = pipeline::run_pipeline(
        &session,
        &config.base_url,
        &query,
        SearchTuning::from_app_config(config),
    )
    .await;
    session.close().await;

    let report = outcome.context("search run failed; no output written")?;

    let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    let (all_path, scored_path) = output::write_result_set(&dir, &query.destination, &report.result)?;

    if report.skipped_extraction > 0 || report.unscored > 0 {
        tracing::warn!(
            skipped_extraction = report.skipped_extraction,
            unscored = report.unscored,
            "run finished with per-listing errors"
        );
    }

    println!(
        "{} listings extracted ({} skipped, {} unranked); wrote {} and {}",
        report.extracted,
        report.skipped_extraction,
        report.unscored,
        all_path.display(),
        scored_path.display()
    );

    Ok(())
}
