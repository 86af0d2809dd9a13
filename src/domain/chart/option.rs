//! Declarative chart description handed to the rendering sink.
//!
//! The shape follows the ECharts `option` object so it can be serialized and
//! passed through unchanged. Everything here is plain data: two options built
//! from the same inputs compare equal.

use super::layout::LayoutPlan;
use super::tooltip::TooltipAggregator;
use super::value_objects::{Color, Panel, PanelKey, Percent};
use crate::domain::market_data::{TradeSide, TradeTerm};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOption {
    pub animation: bool,
    pub tooltip: TooltipOption,
    pub axis_pointer: AxisPointerOption,
    pub grid: Vec<GridOption>,
    pub x_axis: Vec<AxisOption>,
    pub y_axis: Vec<AxisOption>,
    pub data_zoom: Vec<DataZoomOption>,
    pub series: Vec<SeriesOption>,
    #[serde(skip)]
    pub layout: LayoutPlan,
    #[serde(skip)]
    pub tooltip_data: TooltipAggregator,
}

impl ChartOption {
    pub fn panels(&self) -> Vec<Panel> {
        self.layout.panels()
    }

    pub fn series_on(&self, panel: PanelKey) -> impl Iterator<Item = &SeriesOption> {
        self.series.iter().filter(move |s| s.panel == panel)
    }

    pub fn find_series(&self, key: &str) -> Option<&SeriesOption> {
        self.series.iter().find(|s| s.key == key)
    }

    /// Every trade-level reference line across all series.
    pub fn trade_lines(&self) -> impl Iterator<Item = &MarkLineItem> {
        self.series.iter().filter_map(|s| s.mark_line.as_ref()).flat_map(|m| m.data.iter())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOption {
    pub trigger: &'static str,
    pub axis_pointer: PointerStyle,
}

impl Default for TooltipOption {
    fn default() -> Self {
        Self { trigger: "axis", axis_pointer: PointerStyle { kind: "cross" } }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointerStyle {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Links the pointer of every x axis so hovering one panel highlights all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisPointerOption {
    pub link: Vec<AxisLink>,
}

impl Default for AxisPointerOption {
    fn default() -> Self {
        Self { link: vec![AxisLink { x_axis_index: "all" }] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLink {
    pub x_axis_index: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridOption {
    pub left: Percent,
    pub right: Percent,
    pub top: Percent,
    pub height: Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Category,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOption {
    #[serde(rename = "type")]
    pub kind: AxisType,
    pub grid_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_gap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_number: Option<u32>,
    pub axis_label: Toggle,
    pub axis_tick: Toggle,
}

impl AxisOption {
    pub fn category(grid_index: usize, dates: Vec<String>, show_labels: bool) -> Self {
        Self {
            kind: AxisType::Category,
            grid_index,
            data: Some(dates),
            boundary_gap: Some(true),
            scale: None,
            split_number: None,
            axis_label: Toggle { show: show_labels },
            axis_tick: Toggle { show: show_labels },
        }
    }

    pub fn value(grid_index: usize, split_number: Option<u32>) -> Self {
        Self {
            kind: AxisType::Value,
            grid_index,
            data: None,
            boundary_gap: None,
            scale: Some(true),
            split_number,
            axis_label: Toggle { show: true },
            axis_tick: Toggle { show: true },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toggle {
    pub show: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataZoomKind {
    Inside,
    Slider,
}

/// Zoom control; every instance lists all x axes so panels pan together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoomOption {
    #[serde(rename = "type")]
    pub kind: DataZoomKind,
    pub x_axis_index: Vec<usize>,
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Percent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Candlestick,
    Line,
    Bar,
}

/// Series payload: `[open, close, low, high]` rows for candles, nullable
/// values for everything else (`null` leaves a gap).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Ohlc(Vec<[f64; 4]>),
    Values(Vec<Option<f64>>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Ohlc(rows) => rows.len(),
            SeriesData::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub x_axis_index: usize,
    pub y_axis_index: usize,
    pub data: SeriesData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_symbol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_line: Option<MarkLineOption>,
    #[serde(skip)]
    pub key: String,
    #[serde(skip)]
    pub panel: PanelKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    pub color: Color,
    /// Bearish candle fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color0: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color0: Option<Color>,
}

impl ItemStyle {
    pub fn solid(color: Color) -> Self {
        Self { color, color0: None, border_color: None, border_color0: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    #[serde(rename = "type")]
    pub kind: LineType,
}

/// Horizontal reference lines attached to a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkLineOption {
    pub silent: bool,
    pub symbol: [&'static str; 2],
    pub data: Vec<MarkLineItem>,
}

impl MarkLineOption {
    pub fn new(data: Vec<MarkLineItem>) -> Self {
        Self { silent: true, symbol: ["none", "none"], data }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLineItem {
    pub name: String,
    pub y_axis: f64,
    pub line_style: LineStyle,
    pub label: MarkLineLabel,
    #[serde(skip)]
    pub term: TradeTerm,
    #[serde(skip)]
    pub side: TradeSide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkLineLabel {
    pub formatter: String,
    pub position: &'static str,
    pub color: Color,
}
