//! Population statistics used when scoring features.

/// The arithmetic mean of the values, or `None` when there are none
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// The population standard deviation of the values around a known mean
pub fn std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;

    Some(variance.sqrt())
}

/// The z-score of a value, defined as 0 when the distribution has no spread
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 || !std_dev.is_finite() {
        0.0
    } else {
        (value - mean) / std_dev
    }
}
