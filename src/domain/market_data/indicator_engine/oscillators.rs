use super::averages::moving_average;
use super::window::{RollingExtreme, RollingSum};
use super::{finite, ratio_percent};
use crate::domain::market_data::Bar;

/// Relative strength index with Wilder averaging.
///
/// Indices `1..=period` seed the average gain/loss; from there on
/// `avg = (avg * (period - 1) + x) / period`. The first `period` entries are
/// `None`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 {
        return out;
    }
    let p = period as f64;
    let (mut avg_gain, mut avg_loss) = (0.0, 0.0);

    for i in 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if i < period {
            avg_gain += gain;
            avg_loss += loss;
            continue;
        }
        if i == period {
            avg_gain = (avg_gain + gain) / p;
            avg_loss = (avg_loss + loss) / p;
        } else {
            avg_gain = (avg_gain * (p - 1.0) + gain) / p;
            avg_loss = (avg_loss * (p - 1.0) + loss) / p;
        }

        out[i] = if avg_loss == 0.0 {
            Some(100.0)
        } else {
            finite(100.0 - 100.0 / (1.0 + avg_gain / avg_loss)).map(|v| v.clamp(0.0, 100.0))
        };
    }
    out
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KdjOutput {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
    pub j: Vec<Option<f64>>,
}

/// Stochastic KDJ.
///
/// RSV uses the trailing `period` bars (fewer at the start of the series) and
/// falls back to 50 on a flat range. The recurrence is seeded with
/// `K = D = 50` and runs from the first bar, so every index is defined.
pub fn kdj(bars: &[Bar], period: usize, k_smooth: usize, d_smooth: usize) -> KdjOutput {
    let m1 = k_smooth.max(1) as f64;
    let m2 = d_smooth.max(1) as f64;
    let mut highs = RollingExtreme::max(period);
    let mut lows = RollingExtreme::min(period);
    let (mut prev_k, mut prev_d) = (50.0, 50.0);
    let mut out = KdjOutput {
        k: Vec::with_capacity(bars.len()),
        d: Vec::with_capacity(bars.len()),
        j: Vec::with_capacity(bars.len()),
    };

    for (i, bar) in bars.iter().enumerate() {
        highs.push(i, bar.high);
        lows.push(i, bar.low);
        let rsv = match (highs.value(), lows.value()) {
            (Some(high), Some(low)) if high - low > 0.0 => {
                finite((bar.close - low) / (high - low) * 100.0).unwrap_or(50.0)
            }
            _ => 50.0,
        };

        let k = ((m1 - 1.0) * prev_k + rsv) / m1;
        let d = ((m2 - 1.0) * prev_d + k) / m2;
        out.k.push(Some(k));
        out.d.push(Some(d));
        out.j.push(Some(3.0 * k - 2.0 * d));
        prev_k = k;
        prev_d = d;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PsyOutput {
    pub psy: Vec<Option<f64>>,
    pub psyma: Vec<Option<f64>>,
}

/// Psychological line: share of up-closes over the last `period` bar pairs.
pub fn psy(closes: &[f64], period: usize, ma_period: usize) -> PsyOutput {
    let mut ups = RollingSum::new(period);
    let mut psy = vec![None; closes.len()];
    for i in 1..closes.len() {
        ups.push(Some(if closes[i] > closes[i - 1] { 1.0 } else { 0.0 }));
        psy[i] = ups.sum().and_then(|count| ratio_percent(count, period as f64));
    }
    let psyma = moving_average(&psy, ma_period);
    PsyOutput { psy, psyma }
}
