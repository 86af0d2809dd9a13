use crate::domain::{
    errors::{AppError, DataSourceResult},
    logging::LogComponent,
    market_data::{
        Bar, Period, Symbol, TradeLevels,
        repositories::{BarDataProvider, TradeLevelProvider},
    },
};
use crate::log_debug;
use std::collections::HashMap;

/// In-memory bar store keyed by symbol and period.
#[derive(Debug, Clone, Default)]
pub struct StaticBarProvider {
    bars: HashMap<(Symbol, Period), Vec<Bar>>,
}

impl StaticBarProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: Symbol, period: Period, bars: Vec<Bar>) -> Self {
        self.bars.insert((symbol, period), bars);
        self
    }

    /// Load a JSON array of bars for `symbol`/`period`.
    pub fn insert_json(&mut self, symbol: Symbol, period: Period, json: &str) -> DataSourceResult<usize> {
        let bars: Vec<Bar> = serde_json::from_str(json)
            .map_err(|e| AppError::DataSourceError(format!("invalid bar payload: {}", e)))?;
        let count = bars.len();
        self.bars.insert((symbol, period), bars);
        Ok(count)
    }
}

impl BarDataProvider for StaticBarProvider {
    fn fetch_bars(&self, symbol: &Symbol, period: Period, limit: usize) -> DataSourceResult<Vec<Bar>> {
        let Some(bars) = self.bars.get(&(symbol.clone(), period)) else {
            log_debug!(LogComponent::Infrastructure("StaticBarProvider"), "No {} bars for {}", period, symbol);
            return Ok(Vec::new());
        };
        let skip = bars.len().saturating_sub(limit);
        Ok(bars[skip..].to_vec())
    }
}

/// In-memory trade levels keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticTradeLevelProvider {
    levels: HashMap<Symbol, TradeLevels>,
}

impl StaticTradeLevelProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_levels(mut self, symbol: Symbol, levels: TradeLevels) -> Self {
        self.levels.insert(symbol, levels);
        self
    }

    pub fn insert_json(&mut self, symbol: Symbol, json: &str) -> DataSourceResult<()> {
        let levels: TradeLevels = serde_json::from_str(json)
            .map_err(|e| AppError::DataSourceError(format!("invalid trade level payload: {}", e)))?;
        self.levels.insert(symbol, levels);
        Ok(())
    }
}

impl TradeLevelProvider for StaticTradeLevelProvider {
    fn fetch_trade_levels(&self, symbol: &Symbol) -> DataSourceResult<Option<TradeLevels>> {
        Ok(self.levels.get(symbol).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_keeps_most_recent_bars() {
        let bars = (1..=5).map(|d| Bar::new(format!("2024-01-0{}", d), 1.0, 2.0, 0.5, 1.5, 10.0)).collect();
        let provider = StaticBarProvider::new().with_bars(Symbol::from("aapl"), Period::Daily, bars);
        let fetched = provider.fetch_bars(&Symbol::from("AAPL"), Period::Daily, 2).unwrap();
        assert_eq!(fetched.iter().map(|b| b.date.as_str()).collect::<Vec<_>>(), vec!["2024-01-04", "2024-01-05"]);
        assert!(provider.fetch_bars(&Symbol::from("AAPL"), Period::Week, 2).unwrap().is_empty());
    }

    #[test]
    fn unknown_symbol_has_no_levels() {
        let provider = StaticTradeLevelProvider::new();
        assert_eq!(provider.fetch_trade_levels(&Symbol::from("MSFT")).unwrap(), None);
    }
}
