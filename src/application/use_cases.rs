use super::render_controller::ChartInput;
use crate::domain::{
    errors::DataSourceResult,
    logging::{LogComponent, get_logger},
    market_data::{
        Period, Symbol,
        repositories::{BarDataProvider, TradeLevelProvider},
        services::DataValidationService,
    },
};
use crate::log_warn;

/// Use Case: pull bars and trade levels for one symbol into a chart update.
///
/// Bar provider failures and malformed bar sequences are returned to the
/// caller. Trade levels are optional decoration: a failing trade-level
/// provider is logged and the chart goes ahead without an overlay.
pub struct LoadChartUseCase<B: BarDataProvider, T: TradeLevelProvider> {
    bar_provider: B,
    trade_level_provider: T,
    validation_service: DataValidationService,
    limit: usize,
}

impl<B: BarDataProvider, T: TradeLevelProvider> LoadChartUseCase<B, T> {
    pub fn new(bar_provider: B, trade_level_provider: T, limit: usize) -> Self {
        Self { bar_provider, trade_level_provider, validation_service: DataValidationService::new(), limit }
    }

    pub fn execute(&self, symbol: &Symbol, period: Period) -> DataSourceResult<ChartInput> {
        let bars = self.bar_provider.fetch_bars(symbol, period, self.limit)?;
        self.validation_service.validate_sequence(&bars)?;

        let trade_levels = match self.trade_level_provider.fetch_trade_levels(symbol) {
            Ok(levels) => levels,
            Err(e) => {
                log_warn!(LogComponent::Application("LoadChart"), "Trade levels unavailable for {}: {}", symbol, e);
                None
            }
        };

        get_logger().info(
            LogComponent::Application("LoadChart"),
            &format!(
                "Loaded {} {} bars for {} ({} trade levels)",
                bars.len(),
                period,
                symbol,
                if trade_levels.is_some() { "with" } else { "no" }
            ),
        );

        Ok(ChartInput::new().with_bars(bars).with_trade_levels(trade_levels))
    }
}
