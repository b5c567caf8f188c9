//! Statistical math utilities shared by the metrics and Monte Carlo engines.
//!
//! Percentiles use linear interpolation between closest ranks, computed the
//! same way as NumPy's default `linear` method so that results line up with
//! fixtures produced by array tooling.

/// Calculate mean of a slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculate sample standard deviation (n − 1 denominator).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let avg = mean(values)?;
    let variance_sum: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    Some((variance_sum / (values.len() - 1) as f64).sqrt())
}

/// Calculate biased sample skewness, `m3 / m2^1.5` with population moments.
///
/// Returns `None` for fewer than three values and `Some(0.0)` when every
/// value is identical.
pub fn skewness(values: &[f64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }

    let n = values.len() as f64;
    let avg = mean(values)?;
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(m2, m3), v| {
        let d = v - avg;
        (m2 + d * d, m3 + d * d * d)
    });
    let (m2, m3) = (m2 / n, m3 / n);

    if m2 == 0.0 {
        return Some(0.0);
    }
    Some(m3 / m2.powf(1.5))
}

/// Calculate the median. Even-length input averages the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    median_of_sorted(&sorted_copy(values))
}

/// [`median`] of values already sorted ascending.
pub fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Fraction of strictly positive values.
pub fn win_rate(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let wins = values.iter().filter(|v| **v > 0.0).count();
    Some(wins as f64 / values.len() as f64)
}

/// Calculate the `q`-th percentile (`0..=100`) of ascending, non-empty values.
pub fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let last = sorted.len() - 1;
    let rank = (q / 100.0) * last as f64;
    let lower = (rank.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    lerp(sorted[lower], sorted[upper], rank - lower as f64)
}

/// Interpolate from `a` towards `b`, evaluated from the nearer endpoint.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Copy and sort ascending (NaN last).
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Equity after each trade: `initial + cumulative_sum(pnl)`.
pub fn equity_curve(pnl: &[f64], initial_capital: f64) -> Vec<f64> {
    let mut cumulative = 0.0;
    pnl.iter()
        .map(|p| {
            cumulative += p;
            initial_capital + cumulative
        })
        .collect()
}

/// Deepest drawdown of an equity path (≤ 0). Empty input yields 0.
pub fn max_drawdown<'a>(equity: impl IntoIterator<Item = &'a f64>) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &e in equity {
        peak = peak.max(e);
        worst = worst.min((e - peak) / peak);
    }
    worst
}
