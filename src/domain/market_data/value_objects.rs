use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::errors::{AppError, ValidationResult};

/// Value Object - ticker symbol, normalized to upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "Symbol({})", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: &str) -> ValidationResult<Self> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError("Symbol cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

/// Value Object - bar granularity accepted by the bar-data provider
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Week,
    Month,
}

/// Value Object - horizon of an externally recommended trade level
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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TradeTerm {
    ShortTerm,
    MidTerm,
    LongTerm,
}

impl TradeTerm {
    /// Human label used in reference-line captions.
    pub fn label(&self) -> &'static str {
        match self {
            TradeTerm::ShortTerm => "Short-term",
            TradeTerm::MidTerm => "Mid-term",
            TradeTerm::LongTerm => "Long-term",
        }
    }
}

/// Side of a trade level line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, AsRefStr)]
pub enum TradeSide {
    Buy,
    Sell,
}
