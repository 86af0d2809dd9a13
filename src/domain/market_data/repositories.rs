use super::{Bar, Period, Symbol, TradeLevels};
use crate::domain::errors::DataSourceResult;

/// Source of bar data.
///
/// "No data" is an empty vector, never an error; errors are reserved for
/// genuine I/O failures of the backing store.
pub trait BarDataProvider {
    fn fetch_bars(&self, symbol: &Symbol, period: Period, limit: usize) -> DataSourceResult<Vec<Bar>>;
}

/// Source of externally recommended trade levels.
///
/// `Ok(None)` means "no overlay" and is not an error.
pub trait TradeLevelProvider {
    fn fetch_trade_levels(&self, symbol: &Symbol) -> DataSourceResult<Option<TradeLevels>>;
}
