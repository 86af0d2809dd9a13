use super::layout::LayoutConfig;
use super::value_objects::Palette;
use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::market_data::{DEFAULT_MAX_BARS, IndicatorParams};
use serde::{Deserialize, Serialize};

/// Host-supplied chart settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub max_bars: usize,
    /// Bars shown by the initial zoom window
    pub visible_bars: usize,
    pub layout: LayoutConfig,
    pub indicators: IndicatorParams,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_bars: DEFAULT_MAX_BARS,
            visible_bars: 120,
            layout: LayoutConfig::default(),
            indicators: IndicatorParams::default(),
            palette: Palette::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AppError::ConfigurationError(format!("invalid chart config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.max_bars == 0 {
            return Err(AppError::ConfigurationError("maxBars must be positive".into()));
        }
        if self.visible_bars == 0 {
            return Err(AppError::ConfigurationError("visibleBars must be positive".into()));
        }
        let params = &self.indicators;
        let periods = [
            params.rsi_period,
            params.macd_fast,
            params.macd_slow,
            params.macd_signal,
            params.kdj_period,
            params.brar_period,
            params.dmi_period,
            params.cr_period,
            params.psy_period,
            params.psy_ma_period,
            params.dma_short,
            params.dma_long,
            params.dma_signal,
            params.trix_period,
            params.trix_signal,
        ];
        if periods.contains(&0) || params.ma_periods.contains(&0) {
            return Err(AppError::ConfigurationError("indicator periods must be positive".into()));
        }
        self.layout.validate()
    }
}
