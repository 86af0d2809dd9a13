//! Indicator Engine: pure functions from price data to index-aligned series.
//!
//! Every function returns one `Vec<Option<f64>>` per output line, with the same
//! length as its input. `None` marks warm-up and degenerate math (zero range,
//! zero denominator); a computed zero stays `Some(0.0)`. No state survives
//! between calls.

mod averages;
mod oscillators;
mod sentiment;
mod trend;
pub mod window;

pub use averages::{ema, ema_of, ma, moving_average};
pub use oscillators::{KdjOutput, PsyOutput, kdj, psy, rsi};
pub use sentiment::{BrarOutput, brar, cr};
pub use trend::{DmaOutput, DmiOutput, MacdOutput, TrixOutput, dma, dmi, macd, trix};

#[inline]
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `numerator / denominator * 100`, or `None` on a zero denominator.
#[inline]
pub(crate) fn ratio_percent(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    finite(numerator / denominator * 100.0)
}
