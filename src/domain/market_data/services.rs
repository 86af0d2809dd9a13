use super::entities::Bar;
use crate::domain::errors::{AppError, ValidationResult};

/// Domain service validating bar data before it reaches the indicator engine.
#[derive(Debug, Clone, Default)]
pub struct DataValidationService;

impl DataValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a single bar with a descriptive error
    pub fn validate_bar(&self, bar: &Bar) -> ValidationResult<()> {
        if bar.date.trim().is_empty() {
            return Err(AppError::ValidationError("Bar date cannot be empty".to_string()));
        }

        let fields = [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
            ("volume", bar.volume),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(AppError::ValidationError(format!(
                "Bar {} has a non-finite {}",
                bar.date, name
            )));
        }

        if bar.high < bar.low {
            return Err(AppError::ValidationError(format!(
                "Bar {}: high {} is lower than low {}",
                bar.date, bar.high, bar.low
            )));
        }

        if bar.volume < 0.0 {
            return Err(AppError::ValidationError(format!("Bar {}: negative volume", bar.date)));
        }

        Ok(())
    }

    /// Validate every bar plus strict chronological order.
    ///
    /// Dates are ISO strings, so lexicographic order is chronological order.
    pub fn validate_sequence(&self, bars: &[Bar]) -> ValidationResult<()> {
        for bar in bars {
            self.validate_bar(bar)?;
        }

        if let Some(i) = bars.windows(2).position(|pair| pair[1].date <= pair[0].date) {
            return Err(AppError::ValidationError(format!(
                "Bars are not in chronological order at index {}: {} follows {}",
                i + 1,
                bars[i + 1].date,
                bars[i].date
            )));
        }

        Ok(())
    }
}
