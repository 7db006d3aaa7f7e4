use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::WindowAggregator;

/// Evict on a timer so the window stays bounded while no one writes.
/// Runs until `running` is cleared; the flag is checked on every tick.
pub fn spawn_sweeper(
    aggregator: Arc<WindowAggregator>,
    every: Duration,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while running.load(Ordering::Relaxed) {
            interval.tick().await;
            let evicted = aggregator.evict_expired();
            if evicted > 0 {
                tracing::debug!(evicted, "Sweep evicted expired samples");
            }
        }
    })
}
