//! Technical-analysis chart core for the browser.
//!
//! Bars go through the indicator engine, the panel layout planner and the
//! series composer into one declarative chart option, which the render
//! controller hands to a rendering sink (ECharts in the browser, an in-memory
//! journal in tests).

use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Install the panic hook, console logger and browser clock.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::for_build()));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    get_logger().info(LogComponent::Presentation("Initialize"), "Indicator chart core initialized");
}

/// Indicator keys accepted by `IndicatorChartApi.setIndicators`.
#[wasm_bindgen(js_name = indicatorKeys)]
pub fn indicator_keys() -> Vec<String> {
    use strum::IntoEnumIterator;
    domain::market_data::IndicatorKind::iter().map(|kind| kind.key().to_string()).collect()
}
