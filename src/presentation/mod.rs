//! Thin view adapters over `application::RenderController`.

pub mod chart_view;
pub mod wasm_api;

pub use chart_view::IndicatorChart;
pub use wasm_api::IndicatorChartApi;
