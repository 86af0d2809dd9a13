use super::ratio_percent;
use super::window::RollingSum;
use crate::domain::market_data::Bar;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrarOutput {
    pub br: Vec<Option<f64>>,
    pub ar: Vec<Option<f64>>,
}

/// BR/AR sentiment pair over a trailing window of `period` bars.
///
/// AR compares each bar's high and low with its own open, so it is defined
/// from index `period - 1`. BR compares them with the previous close and needs
/// `period` previous closes, so it starts one bar later.
pub fn brar(bars: &[Bar], period: usize) -> BrarOutput {
    let n = bars.len();
    let mut out = BrarOutput { br: vec![None; n], ar: vec![None; n] };
    let mut ar_up = RollingSum::new(period);
    let mut ar_down = RollingSum::new(period);
    let mut br_up = RollingSum::new(period);
    let mut br_down = RollingSum::new(period);

    for (i, bar) in bars.iter().enumerate() {
        ar_up.push(Some(bar.high - bar.open));
        ar_down.push(Some(bar.open - bar.low));
        if let (Some(up), Some(down)) = (ar_up.sum(), ar_down.sum()) {
            out.ar[i] = ratio_percent(up, down);
        }

        if i == 0 {
            continue;
        }
        let prev_close = bars[i - 1].close;
        br_up.push(Some((bar.high - prev_close).max(0.0)));
        br_down.push(Some((prev_close - bar.low).max(0.0)));
        if let (Some(up), Some(down)) = (br_up.sum(), br_down.sum()) {
            out.br[i] = ratio_percent(up, down);
        }
    }
    out
}

/// CR energy indicator against the previous bar's typical price.
pub fn cr(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; bars.len()];
    let mut up = RollingSum::new(period);
    let mut down = RollingSum::new(period);

    for i in 1..bars.len() {
        let mid = bars[i - 1].typical_price();
        up.push(Some((bars[i].high - mid).max(0.0)));
        down.push(Some((mid - bars[i].low).max(0.0)));
        if let (Some(up_sum), Some(down_sum)) = (up.sum(), down.sum()) {
            out[i] = ratio_percent(up_sum, down_sum);
        }
    }
    out
}
