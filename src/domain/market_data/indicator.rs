use super::entities::BarSeries;
use super::indicator_engine as engine;
use crate::domain::errors::{AppError, ValidationResult};
use crate::log_warn;
use crate::domain::logging::LogComponent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Where an indicator is conventionally drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorPlacement {
    /// On top of the price candles
    Overlay,
    /// Dedicated volume panel
    Volume,
    /// Shared oscillator panel
    Oscillator,
}

/// Closed vocabulary of selectable indicators.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum IndicatorKind {
    #[strum(serialize = "ma")]
    #[serde(rename = "ma")]
    MovingAverage,
    #[strum(serialize = "volume")]
    #[serde(rename = "volume")]
    Volume,
    #[strum(serialize = "rsi")]
    #[serde(rename = "rsi")]
    Rsi,
    #[strum(serialize = "macd")]
    #[serde(rename = "macd")]
    Macd,
    #[strum(serialize = "kdj")]
    #[serde(rename = "kdj")]
    Kdj,
    #[strum(serialize = "kd")]
    #[serde(rename = "kd")]
    Kd,
    #[strum(serialize = "brar")]
    #[serde(rename = "brar")]
    Brar,
    #[strum(serialize = "dmi")]
    #[serde(rename = "dmi")]
    Dmi,
    #[strum(serialize = "cr")]
    #[serde(rename = "cr")]
    Cr,
    #[strum(serialize = "psy")]
    #[serde(rename = "psy")]
    Psy,
    #[strum(serialize = "dma")]
    #[serde(rename = "dma")]
    Dma,
    #[strum(serialize = "trix")]
    #[serde(rename = "trix")]
    Trix,
}

impl IndicatorKind {
    pub fn key(&self) -> &str {
        self.as_ref()
    }

    pub fn placement(&self) -> IndicatorPlacement {
        match self {
            IndicatorKind::MovingAverage => IndicatorPlacement::Overlay,
            IndicatorKind::Volume => IndicatorPlacement::Volume,
            IndicatorKind::Rsi
            | IndicatorKind::Macd
            | IndicatorKind::Kdj
            | IndicatorKind::Kd
            | IndicatorKind::Brar
            | IndicatorKind::Dmi
            | IndicatorKind::Cr
            | IndicatorKind::Psy
            | IndicatorKind::Dma
            | IndicatorKind::Trix => IndicatorPlacement::Oscillator,
        }
    }

    pub fn is_oscillator(&self) -> bool {
        self.placement() == IndicatorPlacement::Oscillator
    }

    /// Every oscillator-class kind.
    pub fn oscillators() -> impl Iterator<Item = IndicatorKind> {
        IndicatorKind::iter().filter(IndicatorKind::is_oscillator)
    }

    /// Run the indicator over `bars`, one series per output line.
    pub fn compute(&self, bars: &BarSeries, params: &IndicatorParams) -> Vec<IndicatorSeries> {
        let closes = bars.closes();
        match self {
            IndicatorKind::MovingAverage => params
                .ma_periods
                .iter()
                .map(|&period| {
                    IndicatorSeries::line(
                        format!("ma{}", period),
                        format!("MA{}", period),
                        engine::ma(&closes, period),
                    )
                })
                .collect(),
            IndicatorKind::Volume => {
                let values = bars.volumes().into_iter().map(Some).collect();
                vec![IndicatorSeries::bar("volume", "Volume", values).with_format(ValueFormat::Volume)]
            }
            IndicatorKind::Rsi => vec![IndicatorSeries::line(
                "rsi",
                format!("RSI{}", params.rsi_period),
                engine::rsi(&closes, params.rsi_period),
            )],
            IndicatorKind::Macd => {
                let out = engine::macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
                vec![
                    IndicatorSeries::line("macd.dif", "DIF", out.dif),
                    IndicatorSeries::line("macd.dea", "DEA", out.dea),
                    IndicatorSeries::bar("macd.hist", "MACD", out.macd),
                ]
            }
            IndicatorKind::Kdj => {
                let out = engine::kdj(bars.bars(), params.kdj_period, params.kdj_k_smooth, params.kdj_d_smooth);
                vec![
                    IndicatorSeries::line("kdj.k", "K", out.k),
                    IndicatorSeries::line("kdj.d", "D", out.d),
                    IndicatorSeries::line("kdj.j", "J", out.j),
                ]
            }
            IndicatorKind::Kd => {
                let out = engine::kdj(bars.bars(), params.kdj_period, params.kdj_k_smooth, params.kdj_d_smooth);
                vec![
                    IndicatorSeries::line("kd.k", "KD-K", out.k),
                    IndicatorSeries::line("kd.d", "KD-D", out.d),
                ]
            }
            IndicatorKind::Brar => {
                let out = engine::brar(bars.bars(), params.brar_period);
                vec![
                    IndicatorSeries::line("brar.br", "BR", out.br),
                    IndicatorSeries::line("brar.ar", "AR", out.ar),
                ]
            }
            IndicatorKind::Dmi => {
                let out = engine::dmi(bars.bars(), params.dmi_period);
                vec![
                    IndicatorSeries::line("dmi.pdi", "+DI", out.pdi),
                    IndicatorSeries::line("dmi.mdi", "-DI", out.mdi),
                    IndicatorSeries::line("dmi.adx", "ADX", out.adx),
                ]
            }
            IndicatorKind::Cr => {
                vec![IndicatorSeries::line("cr", "CR", engine::cr(bars.bars(), params.cr_period))]
            }
            IndicatorKind::Psy => {
                let out = engine::psy(&closes, params.psy_period, params.psy_ma_period);
                vec![
                    IndicatorSeries::line("psy", "PSY", out.psy),
                    IndicatorSeries::line("psy.ma", "PSYMA", out.psyma),
                ]
            }
            IndicatorKind::Dma => {
                let out = engine::dma(&closes, params.dma_short, params.dma_long, params.dma_signal);
                vec![
                    IndicatorSeries::line("dma", "DMA", out.dma),
                    IndicatorSeries::line("dma.ama", "AMA", out.ama),
                ]
            }
            IndicatorKind::Trix => {
                let out = engine::trix(&closes, params.trix_period, params.trix_signal);
                vec![
                    IndicatorSeries::line("trix", "TRIX", out.trix),
                    IndicatorSeries::line("trix.ma", "MATRIX", out.matrix),
                ]
            }
        }
    }
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStyle {
    Line,
    Bar,
}

/// How a series value is printed in the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueFormat {
    /// Large-number abbreviation (`1.23M`)
    Volume,
    /// Two-decimal fixed point
    #[default]
    Fixed2,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Fixed2 => format!("{:.2}", value),
            ValueFormat::Volume => abbreviate_volume(value),
        }
    }
}

fn abbreviate_volume(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}

/// One named output line of an indicator, index-aligned with the bars.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub key: String,
    /// Human-readable name; series without one are left out of tooltips.
    pub label: Option<String>,
    pub style: DrawStyle,
    pub format: ValueFormat,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn line(key: impl Into<String>, label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            key: key.into(),
            label: Some(label.into()),
            style: DrawStyle::Line,
            format: ValueFormat::Fixed2,
            values,
        }
    }

    pub fn bar(key: impl Into<String>, label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self { style: DrawStyle::Bar, ..Self::line(key, label, values) }
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }
}

/// Membership-only set of active indicators.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSelection(BTreeSet<IndicatorKind>);

impl IndicatorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict parse: any unknown key is an error.
    pub fn parse_keys<S: AsRef<str>>(keys: &[S]) -> ValidationResult<Self> {
        keys.iter()
            .map(|key| {
                IndicatorKind::from_str(key.as_ref().trim()).map_err(|_| {
                    AppError::ValidationError(format!("Unknown indicator key: {}", key.as_ref()))
                })
            })
            .collect::<ValidationResult<BTreeSet<_>>>()
            .map(Self)
    }

    /// Lenient parse for UI input: unknown keys are logged and skipped.
    pub fn from_keys_lenient<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut selection = Self::new();
        for key in keys {
            match IndicatorKind::from_str(key.as_ref().trim()) {
                Ok(kind) => {
                    selection.insert(kind);
                }
                Err(_) => {
                    log_warn!(LogComponent::Domain("IndicatorSelection"), "Ignoring unknown indicator key '{}'", key.as_ref());
                }
            }
        }
        selection
    }

    pub fn insert(&mut self, kind: IndicatorKind) -> bool {
        self.0.insert(kind)
    }

    pub fn remove(&mut self, kind: IndicatorKind) -> bool {
        self.0.remove(&kind)
    }

    /// Flip membership; returns whether the kind is now selected.
    pub fn toggle(&mut self, kind: IndicatorKind) -> bool {
        if self.0.remove(&kind) {
            false
        } else {
            self.0.insert(kind);
            true
        }
    }

    pub fn contains(&self, kind: IndicatorKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn has_oscillator(&self) -> bool {
        self.0.iter().any(IndicatorKind::is_oscillator)
    }

    pub fn iter(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<IndicatorKind> for IndicatorSelection {
    fn from_iter<I: IntoIterator<Item = IndicatorKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Periods for every indicator family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndicatorParams {
    pub ma_periods: Vec<usize>,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub kdj_period: usize,
    pub kdj_k_smooth: usize,
    pub kdj_d_smooth: usize,
    pub brar_period: usize,
    pub dmi_period: usize,
    pub cr_period: usize,
    pub psy_period: usize,
    pub psy_ma_period: usize,
    pub dma_short: usize,
    pub dma_long: usize,
    pub dma_signal: usize,
    pub trix_period: usize,
    pub trix_signal: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_periods: vec![5, 10, 20, 60],
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            kdj_period: 9,
            kdj_k_smooth: 3,
            kdj_d_smooth: 3,
            brar_period: 26,
            dmi_period: 14,
            cr_period: 26,
            psy_period: 12,
            psy_ma_period: 6,
            dma_short: 10,
            dma_long: 50,
            dma_signal: 10,
            trix_period: 12,
            trix_signal: 9,
        }
    }
}
