use derive_more::Display;

/// Error type shared by every layer of the chart core.
///
/// Indicator math never produces one of these: degenerate values collapse to
/// `None` instead. Errors are reserved for structural failures (unusable bar
/// data, a rendering sink that cannot be created) and for malformed input at
/// the JS boundary.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Validation Error: {}", _0)]
    ValidationError(String),
    #[display(fmt = "Rendering Error: {}", _0)]
    RenderingError(String),
    #[display(fmt = "Configuration Error: {}", _0)]
    ConfigurationError(String),
    #[display(fmt = "Data Source Error: {}", _0)]
    DataSourceError(String),
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::ValidationError(format!("malformed JSON: {}", error))
    }
}

pub type ValidationResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
pub type DataSourceResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure_kind() {
        let err = AppError::ConfigurationError("visibleBars must be positive".into());
        assert_eq!(err.to_string(), "Configuration Error: visibleBars must be positive");
        let err: AppError = serde_json::from_str::<Vec<f64>>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("Validation Error: malformed JSON"));
    }
}
