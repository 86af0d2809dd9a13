use super::averages::{ema, ema_of, ma, moving_average};
use super::ratio_percent;
use super::window::RollingSum;
use crate::domain::market_data::Bar;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdOutput {
    pub dif: Vec<Option<f64>>,
    pub dea: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
}

/// MACD: `dif = EMA(fast) - EMA(slow)`, `dea = EMA(dif, signal)`,
/// `macd = (dif - dea) * 2`.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdOutput {
    let fast_ema = ema_of(closes, fast);
    let slow_ema = ema_of(closes, slow);
    let dif = zip_with(&fast_ema, &slow_ema, |f, s| Some(f - s));
    let dea = ema(&dif, signal);
    let macd = zip_with(&dif, &dea, |d, e| Some((d - e) * 2.0));
    MacdOutput { dif, dea, macd }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DmiOutput {
    pub pdi: Vec<Option<f64>>,
    pub mdi: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
}

/// Directional movement index over plain sliding sums.
///
/// True range and directional movement come from adjacent bar pairs and are
/// summed over the last `period` pairs (no Wilder smoothing). ADX is the mean
/// of the last `period` DX samples, so it first appears at `2 * period - 1`.
pub fn dmi(bars: &[Bar], period: usize) -> DmiOutput {
    let n = bars.len();
    let mut out = DmiOutput { pdi: vec![None; n], mdi: vec![None; n], adx: vec![None; n] };
    let mut tr_window = RollingSum::new(period);
    let mut plus_window = RollingSum::new(period);
    let mut minus_window = RollingSum::new(period);
    let mut dx_window = RollingSum::new(period);

    for i in 1..n {
        let (bar, prev) = (&bars[i], &bars[i - 1]);
        let true_range = (bar.high - bar.low)
            .max((bar.high - prev.close).abs())
            .max((bar.low - prev.close).abs());
        let up_move = bar.high - prev.high;
        let down_move = prev.low - bar.low;
        let plus_dm = if up_move > down_move && up_move > 0.0 { up_move } else { 0.0 };
        let minus_dm = if down_move > up_move && down_move > 0.0 { down_move } else { 0.0 };

        tr_window.push(Some(true_range));
        plus_window.push(Some(plus_dm));
        minus_window.push(Some(minus_dm));

        let (Some(tr_sum), Some(plus_sum), Some(minus_sum)) =
            (tr_window.sum(), plus_window.sum(), minus_window.sum())
        else {
            continue;
        };

        let pdi = ratio_percent(plus_sum, tr_sum);
        let mdi = ratio_percent(minus_sum, tr_sum);
        out.pdi[i] = pdi;
        out.mdi[i] = mdi;

        let dx = match (pdi, mdi) {
            (Some(p), Some(m)) => ratio_percent((p - m).abs(), p + m),
            _ => None,
        };
        dx_window.push(dx);
        out.adx[i] = dx_window.mean();
    }
    out
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DmaOutput {
    pub dma: Vec<Option<f64>>,
    pub ama: Vec<Option<f64>>,
}

/// Different of moving averages: `MA(short) - MA(long)` and its trailing mean.
pub fn dma(closes: &[f64], short: usize, long: usize, signal: usize) -> DmaOutput {
    let dma = zip_with(&ma(closes, short), &ma(closes, long), |s, l| Some(s - l));
    let ama = moving_average(&dma, signal);
    DmaOutput { dma, ama }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrixOutput {
    pub trix: Vec<Option<f64>>,
    pub matrix: Vec<Option<f64>>,
}

/// Rate of change of a triple-smoothed EMA, in percent.
pub fn trix(closes: &[f64], period: usize, signal: usize) -> TrixOutput {
    let triple = ema(&ema(&ema_of(closes, period), period), period);
    let mut trix = vec![None; closes.len()];
    for i in 1..triple.len() {
        if let (Some(current), Some(previous)) = (triple[i], triple[i - 1]) {
            trix[i] = ratio_percent(current - previous, previous);
        }
    }
    let matrix = moving_average(&trix, signal);
    TrixOutput { trix, matrix }
}

fn zip_with(
    left: &[Option<f64>],
    right: &[Option<f64>],
    f: impl Fn(f64, f64) -> Option<f64>,
) -> Vec<Option<f64>> {
    left.iter()
        .zip(right)
        .map(|(l, r)| match (l, r) {
            (Some(l), Some(r)) => f(*l, *r).filter(|v| v.is_finite()),
            _ => None,
        })
        .collect()
}
