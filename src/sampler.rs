use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::metrics::WindowAggregator;

// ─── Public entry point ──────────────────────────────────────────

/// Spawns `producers` Tokio tasks that feed synthetic measurements into
/// the aggregator until the deadline or the `running` flag is cleared.
/// Returns the total number of points added.
pub async fn run(
    running: Arc<AtomicBool>,
    aggregator: Arc<WindowAggregator>,
    producers: u32,
    interval: Duration,
    deadline: Instant,
) -> u64 {
    let mut handles = Vec::with_capacity(producers as usize);

    for worker_id in 0..producers {
        let running = running.clone();
        let aggregator = aggregator.clone();

        handles.push(tokio::spawn(async move {
            worker(worker_id, running, aggregator, interval, deadline).await
        }));
    }

    let mut total = 0;
    for h in handles {
        match h.await {
            Ok(added) => total += added,
            Err(err) => tracing::warn!("Producer task failed: {}", err),
        }
    }

    // Mark the run as finished
    running.store(false, Ordering::SeqCst);
    total
}

// ─── Worker loop ─────────────────────────────────────────────────

async fn worker(
    id: u32,
    running: Arc<AtomicBool>,
    aggregator: Arc<WindowAggregator>,
    interval: Duration,
    deadline: Instant,
) -> u64 {
    // Each worker gets its own deterministic RNG seeded uniquely.
    let mut rng = StdRng::seed_from_u64(1000 + id as u64);
    let mut added = 0;

    while running.load(Ordering::Relaxed) && Instant::now() < deadline {
        aggregator.add_point(next_value(&mut rng));
        added += 1;
        tokio::time::sleep(interval).await;
    }

    tracing::debug!(worker = id, added, "Producer finished");
    added
}

/// Latency-like value in milliseconds: a 20 ms baseline with jitter and
/// an occasional slow outlier.
fn next_value(rng: &mut StdRng) -> f64 {
    let base = 20.0 + rng.gen_range(-5.0..5.0);
    if rng.gen_bool(0.02) {
        base * rng.gen_range(5.0..20.0)
    } else {
        base
    }
}
