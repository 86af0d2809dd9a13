use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::market_data::IndicatorPlacement;
use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - chart panel identity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, AsRefStr, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PanelKey {
    #[display(fmt = "main")]
    #[strum(serialize = "main")]
    Main,
    #[display(fmt = "volume")]
    #[strum(serialize = "volume")]
    Volume,
    #[display(fmt = "osc")]
    #[strum(serialize = "osc")]
    Osc,
}

impl PanelKey {
    pub fn for_placement(placement: IndicatorPlacement) -> Self {
        match placement {
            IndicatorPlacement::Overlay => PanelKey::Main,
            IndicatorPlacement::Volume => PanelKey::Volume,
            IndicatorPlacement::Oscillator => PanelKey::Osc,
        }
    }
}

/// Value Object - one vertical chart panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub key: PanelKey,
    pub weight: u32,
    pub axis_index: usize,
}

/// Value Object - percentage of the container, serialized as `"12.5%"`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display)]
#[display(fmt = "{}%", _0)]
pub struct Percent(f64);

impl Percent {
    /// Rounded to hundredths so layouts compare stably.
    pub fn new(value: f64) -> Self {
        Self((value * 100.0).round() / 100.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Value Object - opaque RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    pub fn to_hex(&self) -> u32 {
        self.0
    }

    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.0)
    }

    pub fn parse(css: &str) -> ValidationResult<Self> {
        let digits = css.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(AppError::ValidationError(format!("Invalid color '{}'", css)));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| AppError::ValidationError(format!("Invalid color '{}'", css)))
    }

    pub const RED: Color = Color::from_hex(0xEF5350);
    pub const GREEN: Color = Color::from_hex(0x26A69A);
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let css = String::deserialize(deserializer)?;
        Color::parse(&css).map_err(serde::de::Error::custom)
    }
}

/// Value Object - chart colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub up: Color,
    pub down: Color,
    pub buy: Color,
    pub sell: Color,
    /// Cycled per panel for indicator lines.
    pub series: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            up: Color::RED,
            down: Color::GREEN,
            buy: Color::from_hex(0x1E88E5),
            sell: Color::from_hex(0xFB8C00),
            series: vec![
                Color::from_hex(0xF5A623),
                Color::from_hex(0x4A90E2),
                Color::from_hex(0xBD10E0),
                Color::from_hex(0x7ED321),
                Color::from_hex(0x50E3C2),
                Color::from_hex(0x9B9B9B),
            ],
        }
    }
}

impl Palette {
    pub fn series_color(&self, slot: usize) -> Color {
        match self.series.len() {
            0 => Color::from_hex(0x888888),
            len => self.series[slot % len],
        }
    }
}
