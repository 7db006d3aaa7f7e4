use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Fixed-point scale: one unit is a thousandth of a percent.
const RANK_SCALE: f64 = 1_000.0;

/// A percentile rank in `[0, 100]`, stored as thousandths of a percent
/// so results can live in an ordered map without float-key hazards.
/// `99.9` and `99.9000001` resolve to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PercentileRank(u32);

impl PercentileRank {
    /// `None` for NaN or anything outside `[0, 100]`.
    pub fn new(p: f64) -> Option<Self> {
        if !(0.0..=100.0).contains(&p) {
            return None;
        }
        Some(Self((p * RANK_SCALE).round() as u32))
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / RANK_SCALE
    }
}

impl fmt::Display for PercentileRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.as_f64())
    }
}

/// Serialized as `"p50"`, `"p99.9"` so it works as a JSON object key.
impl Serialize for PercentileRank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ─── Estimator ───────────────────────────────────────────────────

/// Linearly-interpolated percentiles over an ascending slice.
///
/// Ranks outside `[0, 100]` are skipped rather than reported as errors.
/// An empty input yields an empty map.
pub fn estimate_percentiles(sorted: &[f64], ranks: &[f64]) -> BTreeMap<PercentileRank, f64> {
    let mut out = BTreeMap::new();
    if sorted.is_empty() {
        return out;
    }

    for &p in ranks {
        let Some(rank) = PercentileRank::new(p) else {
            continue;
        };
        out.insert(rank, interpolate(sorted, p));
    }
    out
}

/// `sorted` must be non-empty and `p` within `[0, 100]`.
fn interpolate(sorted: &[f64], p: f64) -> f64 {
    let index = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let (lo, hi) = (sorted[lower], sorted[upper]);
    let w = index - lower as f64;
    let span = hi - lo;
    // lo + span*w is monotone in w under rounding; fall back to the
    // weighted form when the span itself overflows.
    let estimate = if span.is_finite() {
        lo + span * w
    } else {
        lo * (1.0 - w) + hi * w
    };
    estimate.clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn rank(p: f64) -> PercentileRank {
        PercentileRank::new(p).unwrap()
    }

    #[test]
    fn rank_rejects_out_of_range() {
        assert!(PercentileRank::new(-0.1).is_none());
        assert!(PercentileRank::new(100.1).is_none());
        assert!(PercentileRank::new(f64::NAN).is_none());
        assert!(PercentileRank::new(0.0).is_some());
        assert!(PercentileRank::new(100.0).is_some());
    }

    #[test]
    fn rank_display_and_quantisation() {
        assert_eq!(rank(50.0).to_string(), "p50");
        assert_eq!(rank(99.9).to_string(), "p99.9");
        assert_eq!(rank(99.9), rank(99.900_000_1));
        assert!(rank(99.0) < rank(99.9));
    }

    #[test]
    fn median_of_odd_series() {
        let out = estimate_percentiles(&[1.0, 2.0, 3.0, 4.0, 5.0], &[50.0]);
        assert_eq!(out.get(&rank(50.0)), Some(&3.0));
    }

    #[test]
    fn interpolates_between_neighbours() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        let out = estimate_percentiles(&sorted, &[0.0, 25.0, 50.0, 100.0]);

        // index = 0.25 * 3 = 0.75 → 10 + 10 * 0.75
        assert_eq!(out[&rank(25.0)], 17.5);
        assert_eq!(out[&rank(50.0)], 25.0);
        assert_eq!(out[&rank(0.0)], 10.0);
        assert_eq!(out[&rank(100.0)], 40.0);
    }

    #[test]
    fn extreme_neighbours_do_not_overflow() {
        let out = estimate_percentiles(&[-1e308, 1e308], &[25.0, 50.0, 75.0]);
        assert_eq!(out[&rank(50.0)], 0.0);
        assert!((out[&rank(25.0)] / -5e307 - 1.0).abs() < 1e-12);
        assert!((out[&rank(75.0)] / 5e307 - 1.0).abs() < 1e-12);

        let out = estimate_percentiles(&[-f64::MAX, f64::MAX], &[50.0]);
        assert_eq!(out[&rank(50.0)], 0.0);
    }

    #[test]
    fn invalid_ranks_are_omitted() {
        let out = estimate_percentiles(&[1.0, 2.0], &[-5.0, 50.0, 150.0, f64::NAN]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[&rank(50.0)], 1.5);
    }

    #[test]
    fn single_element_answers_every_rank() {
        let ranks = [0.0, 1.0, 33.3, 50.0, 99.9, 100.0];
        let out = estimate_percentiles(&[42.0], &ranks);
        assert_eq!(out.len(), ranks.len());
        assert!(out.values().all(|&v| v == 42.0));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(estimate_percentiles(&[], &[50.0, 99.0]).is_empty());
    }

    #[test]
    fn estimates_are_monotone_in_rank() {
        let mut rng = StdRng::seed_from_u64(7);
        let ranks: Vec<f64> = (0..=1000).map(|i| i as f64 / 10.0).collect();

        for _ in 0..200 {
            let n = rng.gen_range(1..64);
            let mut values: Vec<f64> = (0..n).map(|_| rng.gen_range(-1e6..1e6)).collect();
            values.sort_by(f64::total_cmp);

            let out = estimate_percentiles(&values, &ranks);
            let estimates: Vec<f64> = out.values().copied().collect();
            assert!(
                estimates.windows(2).all(|w| w[0] <= w[1]),
                "non-monotone estimates for {values:?}"
            );
            assert_eq!(estimates.first(), values.first());
            assert_eq!(estimates.last(), values.last());
        }
    }
}
