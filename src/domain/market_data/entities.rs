pub use super::value_objects::{Period, Symbol, TradeSide, TradeTerm};
use super::services::DataValidationService;
use crate::domain::errors::ValidationResult;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Default cap on the number of bars a render pass works with.
pub const DEFAULT_MAX_BARS: usize = 240;

/// Domain entity - one period's open/high/low/close/volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(date: impl Into<String>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self { date: date.into(), open, high, low, close, volume }
    }

    /// Typical price `(high + low + close) / 3`
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Domain entity - validated, chronologically ascending bar window
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Validate `bars` and keep at most the `max_bars` most recent ones.
    pub fn new(mut bars: Vec<Bar>, max_bars: usize) -> ValidationResult<Self> {
        DataValidationService::new().validate_sequence(&bars)?;
        if bars.len() > max_bars {
            bars.drain(..bars.len() - max_bars);
        }
        Ok(Self { bars })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.volume).collect()
    }

    pub fn dates(&self) -> Vec<String> {
        self.bars.iter().map(|bar| bar.date.clone()).collect()
    }

    /// Date string to bar index, built once per recomputation.
    pub fn date_index(&self) -> HashMap<String, usize> {
        self.bars.iter().enumerate().map(|(i, bar)| (bar.date.clone(), i)).collect()
    }
}

/// Buy/sell recommendation for one horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeLevel {
    pub term: TradeTerm,
    pub buy: Option<f64>,
    pub sell: Option<f64>,
    pub reason: String,
}

impl TradeLevel {
    /// Buy price worth drawing: present, finite and non-zero.
    pub fn buy_price(&self) -> Option<f64> {
        drawable_price(self.buy)
    }

    /// Sell price worth drawing: present, finite and non-zero.
    pub fn sell_price(&self) -> Option<f64> {
        drawable_price(self.sell)
    }

    pub fn price(&self, side: TradeSide) -> Option<f64> {
        match side {
            TradeSide::Buy => self.buy_price(),
            TradeSide::Sell => self.sell_price(),
        }
    }
}

fn drawable_price(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite() && *p != 0.0)
}

/// One term entry as delivered by the trade-level provider.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TradeQuote {
    #[serde(deserialize_with = "lenient_price")]
    pub buy: Option<f64>,
    #[serde(deserialize_with = "lenient_price")]
    pub sell: Option<f64>,
    #[serde(deserialize_with = "lenient_reason")]
    pub reason: String,
}

/// Trade levels keyed by term, e.g.
/// `{"shortTerm":{"buy":10.5,"sell":12.0},"midTerm":null}`.
///
/// Malformed term objects deserialize as absent instead of failing the whole set.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TradeLevels {
    #[serde(deserialize_with = "lenient_quote")]
    pub short_term: Option<TradeQuote>,
    #[serde(deserialize_with = "lenient_quote")]
    pub mid_term: Option<TradeQuote>,
    #[serde(deserialize_with = "lenient_quote")]
    pub long_term: Option<TradeQuote>,
}

impl TradeLevels {
    pub fn quote(&self, term: TradeTerm) -> Option<&TradeQuote> {
        match term {
            TradeTerm::ShortTerm => self.short_term.as_ref(),
            TradeTerm::MidTerm => self.mid_term.as_ref(),
            TradeTerm::LongTerm => self.long_term.as_ref(),
        }
    }

    /// Present terms in short → long order.
    pub fn levels(&self) -> Vec<TradeLevel> {
        [TradeTerm::ShortTerm, TradeTerm::MidTerm, TradeTerm::LongTerm]
            .into_iter()
            .filter_map(|term| {
                self.quote(term).map(|quote| TradeLevel {
                    term,
                    buy: quote.buy,
                    sell: quote.sell,
                    reason: quote.reason.clone(),
                })
            })
            .collect()
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|p| p.is_finite()))
}

fn lenient_reason<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

fn lenient_quote<'de, D>(deserializer: D) -> Result<Option<TradeQuote>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: f64) -> Bar {
        Bar::new(date, close, close + 1.0, close - 1.0, close, 100.0)
    }

    #[test]
    fn series_keeps_most_recent_bars() {
        let bars = vec![bar("2024-01-01", 1.0), bar("2024-01-02", 2.0), bar("2024-01-03", 3.0)];
        let series = BarSeries::new(bars, 2).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[0].date, "2024-01-02");
        assert_eq!(series.closes(), vec![2.0, 3.0]);
    }

    #[test]
    fn date_index_maps_every_bar() {
        let series = BarSeries::new(vec![bar("2024-01-01", 1.0), bar("2024-01-02", 2.0)], 10).unwrap();
        let index = series.date_index();
        assert_eq!(index.get("2024-01-02"), Some(&1));
        assert_eq!(index.get("2024-01-05"), None);
    }

    #[test]
    fn trade_levels_tolerate_junk() {
        let json = r#"{
            "shortTerm": {"buy": 10.5, "sell": 12.0, "reason": "breakout"},
            "midTerm": {"buy": "soon", "sell": null},
            "longTerm": "n/a"
        }"#;
        let levels: TradeLevels = serde_json::from_str(json).unwrap();
        let short = levels.short_term.as_ref().unwrap();
        assert_eq!(short.buy, Some(10.5));
        assert_eq!(short.reason, "breakout");
        let mid = levels.mid_term.as_ref().unwrap();
        assert_eq!(mid.buy, None);
        assert_eq!(mid.sell, None);
        assert!(levels.long_term.is_none());
    }

    #[test]
    fn zero_prices_are_not_drawable() {
        let level = TradeLevel { term: TradeTerm::MidTerm, buy: Some(0.0), sell: Some(7.5), reason: String::new() };
        assert_eq!(level.buy_price(), None);
        assert_eq!(level.price(TradeSide::Sell), Some(7.5));
    }
}
