use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use window_stats::{AggregatorError, WindowAggregator};

const HOUR: Duration = Duration::from_secs(3_600);

#[test]
fn concurrent_adds_are_not_lost() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 1_000;

    let agg = Arc::new(WindowAggregator::new(HOUR, [50.0, 99.0]).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let agg = Arc::clone(&agg);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    agg.add_point((t * PER_THREAD + i) as f64);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let n = THREADS * PER_THREAD;
    let snap = agg.snapshot();
    assert_eq!(snap.count, n);
    assert_eq!(agg.len(), n);
    // Values are exactly 0..n, so the mean is known.
    assert!((snap.mean - (n - 1) as f64 / 2.0).abs() < 1e-9);
    assert_eq!(snap.percentile(50.0), Some((n - 1) as f64 / 2.0));
}

#[test]
fn snapshots_stay_consistent_under_writes() {
    let agg = Arc::new(WindowAggregator::new(HOUR, [0.0, 50.0, 100.0]).unwrap());
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let agg = Arc::clone(&agg);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 0..20_000 {
                agg.add_point(f64::from(i % 100));
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let agg = Arc::clone(&agg);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut last_count = 0;
                while !done.load(Ordering::SeqCst) {
                    let snap = agg.snapshot();
                    // Nothing expires, so the window only grows.
                    assert!(snap.count >= last_count);
                    last_count = snap.count;
                    if snap.has_data() {
                        let lo = snap.percentile(0.0).unwrap();
                        let mid = snap.percentile(50.0).unwrap();
                        let hi = snap.percentile(100.0).unwrap();
                        assert!(lo <= mid && mid <= hi);
                        assert!(lo <= snap.mean && snap.mean <= hi);
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(agg.snapshot().count, 20_000);
}

#[test]
fn window_eviction_end_to_end() {
    let t0 = Instant::now();
    let agg = WindowAggregator::new(Duration::from_secs(300), [50.0]).unwrap();

    agg.add_point_at(10.0, t0);
    agg.add_point_at(20.0, t0 + Duration::from_secs(360));

    let snap = agg.snapshot();
    assert_eq!(snap.count, 1);
    assert_eq!(snap.mean, 20.0);
    assert_eq!(snap.std_dev, 0.0);
    assert_eq!(snap.percentile(50.0), Some(20.0));
}

#[test]
fn zero_window_produces_no_aggregator() {
    assert_eq!(
        WindowAggregator::new(Duration::ZERO, [50.0]).err(),
        Some(AggregatorError::InvalidConfiguration {
            reason: "window duration must be greater than zero".into(),
        })
    );
}
