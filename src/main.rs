use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use window_stats::cli::Cli;
use window_stats::logging::init_logging;
use window_stats::metrics::report::run_reporter;
use window_stats::metrics::sweeper::spawn_sweeper;
use window_stats::{sampler, AppResult, RunConfig, WindowAggregator};

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // ── 1. Logging & config ──────────────────────────────────────
    init_logging(cli.verbose, cli.no_color);
    let config = RunConfig::load(cli.config.as_deref())?;
    tracing::info!(
        window_secs = config.aggregator.window_secs,
        percentiles = ?config.aggregator.percentiles,
        producers = config.producers,
        duration_secs = config.duration_secs,
        "Starting window-stats run"
    );

    // ── 2. Build shared state ────────────────────────────────────
    let aggregator = Arc::new(WindowAggregator::from_config(&config.aggregator)?);
    let running = Arc::new(AtomicBool::new(true));

    // ── 3. Ctrl-C stops every loop ───────────────────────────────
    {
        let running = running.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, stopping");
                running.store(false, Ordering::SeqCst);
            }
        });
    }

    // ── 4. Background tasks ──────────────────────────────────────
    let sweeper = config
        .aggregator
        .sweep_interval()
        .map(|every| spawn_sweeper(aggregator.clone(), every, running.clone()));

    let reporter = tokio::spawn(run_reporter(
        aggregator.clone(),
        config.report_interval(),
        running.clone(),
    ));

    // ── 5. Produce until the deadline ────────────────────────────
    let added = sampler::run(
        running.clone(),
        aggregator.clone(),
        config.producers,
        config.sample_interval(),
        Instant::now() + config.duration(),
    )
    .await;

    reporter.await?;
    if let Some(handle) = sweeper {
        handle.await?;
    }

    let summary = window_stats::Report::capture(&aggregator);
    tracing::info!(added, "Run finished");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
