use super::window::RollingSum;

/// Simple moving average of a plain price sequence.
///
/// `output[i]` is the mean of `values[i - period + 1..=i]`; the first
/// `period - 1` entries are `None`.
pub fn ma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    for (end, window) in values.windows(period).enumerate() {
        out[end + period - 1] = Some(window.iter().sum::<f64>() / period as f64);
    }
    out
}

/// Trailing average of a nullable sequence.
///
/// Defined only where the whole trailing window is non-null, so a derived
/// series inherits the warm-up of its source plus its own.
pub fn moving_average(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut window = RollingSum::new(period);
    values
        .iter()
        .map(|value| {
            window.push(*value);
            window.mean()
        })
        .collect()
}

/// Exponential moving average with `k = 2 / (period + 1)`.
///
/// Seeds on the first non-null input. A null input carries the previous
/// average forward instead of resetting the recurrence.
pub fn ema(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut last: Option<f64> = None;
    values
        .iter()
        .map(|value| {
            last = match (*value, last) {
                (Some(x), Some(prev)) => Some(x * k + prev * (1.0 - k)),
                (Some(x), None) => Some(x),
                (None, prev) => prev,
            };
            last
        })
        .collect()
}

/// [`ema`] over a plain price sequence.
pub fn ema_of(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let nullable: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    ema(&nullable, period)
}
