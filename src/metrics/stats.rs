/// Mean and population standard deviation (divides by `n`, not `n - 1`).
/// Returns `(0.0, 0.0)` for an empty slice.
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    (mean, variance.sqrt())
}
