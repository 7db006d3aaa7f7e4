use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use super::collector::{Snapshot, WindowAggregator};

/// One reporting tick: a snapshot stamped with wall-clock time.
/// Serialized straight into the log line.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub taken_at: DateTime<Utc>,
    pub window_secs: f64,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

impl Report {
    pub fn capture(aggregator: &WindowAggregator) -> Self {
        Self {
            taken_at: Utc::now(),
            window_secs: aggregator.window().as_secs_f64(),
            snapshot: aggregator.snapshot(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ─── Reporting loop ──────────────────────────────────────────────

/// Emits a `Report` as JSON every `every` until `running` is cleared.
/// Returns the last report taken, if any tick fired.
pub async fn run_reporter(
    aggregator: Arc<WindowAggregator>,
    every: Duration,
    running: Arc<AtomicBool>,
) -> Option<Report> {
    let mut ticks = IntervalStream::new(tokio::time::interval(every));
    let mut last = None;

    while running.load(Ordering::Relaxed) {
        if ticks.next().await.is_none() {
            break;
        }

        let report = Report::capture(&aggregator);
        match report.to_json() {
            Ok(json) => tracing::info!(target: "window_stats::report", "{json}"),
            Err(err) => tracing::warn!("Failed to encode report: {}", err),
        }
        last = Some(report);
    }

    last
}
