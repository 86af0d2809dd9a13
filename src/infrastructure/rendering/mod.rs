//! Rendering sinks behind `application::RenderSink`.

pub mod echarts_sink;
pub mod headless_sink;

pub use echarts_sink::EChartsSink;
pub use headless_sink::{HeadlessSink, HeadlessSurface, SinkEvent, SinkJournal};
