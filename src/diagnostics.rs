//! Scalar statistics used for per-generation diagnostics.
//!
//! All functions return `0.0` for inputs too short to define the statistic.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population covariance of two equally long series.
///
/// Extra elements of the longer series are ignored.
pub fn covariance(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let (mx, my) = (mean(xs), mean(ys));
    xs.iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum::<f64>()
        / n as f64
}

/// Pearson correlation coefficient; `0.0` when either series is constant.
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    let denom = (variance(&xs[..n]) * variance(&ys[..n])).sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    covariance(xs, ys) / denom
}
