use super::config::ChartConfig;
use super::layout::{LayoutPlan, plan_layout};
use super::option::{
    AxisOption, AxisPointerOption, ChartOption, DataZoomKind, DataZoomOption, GridOption, ItemStyle, LineStyle,
    LineType, MarkLineItem, MarkLineLabel, MarkLineOption, SeriesData, SeriesKind, SeriesOption, TooltipOption,
};
use super::tooltip::TooltipAggregator;
use super::value_objects::{Palette, PanelKey, Percent};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{
    BarSeries, DrawStyle, IndicatorSelection, IndicatorSeries, TradeLevel, TradeLevels, TradeSide,
};
use crate::log_debug;
use std::collections::HashMap;

/// Full pipeline: indicators, layout, series and tooltip data for one render
/// pass. `None` when there are no bars to draw.
pub fn build_chart_option(
    bars: &BarSeries,
    selection: &IndicatorSelection,
    trade_levels: Option<&TradeLevels>,
    config: &ChartConfig,
) -> Option<ChartOption> {
    let layout = plan_layout(selection, bars.len(), &config.layout)?;
    let palette = &config.palette;

    let mut series = vec![candlestick_series(bars, &layout, palette, trade_levels)];
    let mut computed = Vec::new();
    let mut slots: HashMap<PanelKey, usize> = HashMap::new();

    for kind in selection.iter() {
        let panel = PanelKey::for_placement(kind.placement());
        let Some(axis_index) = layout.axis_index(panel) else {
            continue;
        };
        for indicator in kind.compute(bars, &config.indicators) {
            let slot = slots.entry(panel).or_insert(0);
            series.push(indicator_series(&indicator, panel, axis_index, palette, *slot));
            *slot += 1;
            computed.push(indicator);
        }
    }

    log_debug!(
        LogComponent::Domain("SeriesComposer"),
        "Composed {} series over {} panels for {} bars",
        series.len(),
        layout.len(),
        bars.len()
    );

    let dates = bars.dates();
    let mut grid = Vec::with_capacity(layout.len());
    let mut x_axis = Vec::with_capacity(layout.len());
    let mut y_axis = Vec::with_capacity(layout.len());
    for placement in layout.placements() {
        let axis_index = placement.panel.axis_index;
        grid.push(GridOption {
            left: Percent::new(config.layout.left),
            right: Percent::new(config.layout.right),
            top: placement.top,
            height: placement.height,
        });
        x_axis.push(AxisOption::category(axis_index, dates.clone(), placement.show_x_labels));
        let split_number = (placement.panel.key != PanelKey::Main).then_some(2);
        y_axis.push(AxisOption::value(axis_index, split_number));
    }

    let tooltip_data = TooltipAggregator::new(bars, &computed);
    let data_zoom = zoom_controls(&layout, bars.len(), config.visible_bars);

    Some(ChartOption {
        animation: false,
        tooltip: TooltipOption::default(),
        axis_pointer: AxisPointerOption::default(),
        grid,
        x_axis,
        y_axis,
        data_zoom,
        series,
        layout,
        tooltip_data,
    })
}

fn candlestick_series(
    bars: &BarSeries,
    layout: &LayoutPlan,
    palette: &Palette,
    trade_levels: Option<&TradeLevels>,
) -> SeriesOption {
    let rows = bars.bars().iter().map(|b| [b.open, b.close, b.low, b.high]).collect();
    let lines: Vec<MarkLineItem> = trade_levels
        .map(|levels| levels.levels().iter().flat_map(|level| trade_lines(level, palette)).collect())
        .unwrap_or_default();
    let axis_index = layout.axis_index(PanelKey::Main).unwrap_or(0);

    SeriesOption {
        name: "K".to_string(),
        kind: SeriesKind::Candlestick,
        x_axis_index: axis_index,
        y_axis_index: axis_index,
        data: SeriesData::Ohlc(rows),
        item_style: Some(ItemStyle {
            color: palette.up,
            color0: Some(palette.down),
            border_color: Some(palette.up),
            border_color0: Some(palette.down),
        }),
        line_style: None,
        show_symbol: None,
        mark_line: (!lines.is_empty()).then(|| MarkLineOption::new(lines)),
        key: "candlestick".to_string(),
        panel: PanelKey::Main,
    }
}

/// Up to two reference lines (buy dashed, sell solid) for one term.
fn trade_lines(level: &TradeLevel, palette: &Palette) -> Vec<MarkLineItem> {
    [TradeSide::Buy, TradeSide::Sell]
        .into_iter()
        .filter_map(|side| {
            let price = level.price(side)?;
            let (color, kind) = match side {
                TradeSide::Buy => (palette.buy, LineType::Dashed),
                TradeSide::Sell => (palette.sell, LineType::Solid),
            };
            let caption = format!("{} {} {:.2}", level.term.label(), side, price);
            Some(MarkLineItem {
                name: caption.clone(),
                y_axis: price,
                line_style: LineStyle { color, width: 1.0, kind },
                label: MarkLineLabel { formatter: caption, position: "insideEndTop", color },
                term: level.term,
                side,
            })
        })
        .collect()
}

fn indicator_series(
    indicator: &IndicatorSeries,
    panel: PanelKey,
    axis_index: usize,
    palette: &Palette,
    slot: usize,
) -> SeriesOption {
    let color = palette.series_color(slot);
    let name = indicator.label.clone().unwrap_or_else(|| indicator.key.clone());
    let (kind, item_style, line_style, show_symbol) = match indicator.style {
        DrawStyle::Line => (
            SeriesKind::Line,
            Some(ItemStyle::solid(color)),
            Some(LineStyle { color, width: 1.0, kind: LineType::Solid }),
            Some(false),
        ),
        DrawStyle::Bar => (SeriesKind::Bar, Some(ItemStyle::solid(color)), None, None),
    };

    SeriesOption {
        name,
        kind,
        x_axis_index: axis_index,
        y_axis_index: axis_index,
        data: SeriesData::Values(indicator.values.clone()),
        item_style,
        line_style,
        show_symbol,
        mark_line: None,
        key: indicator.key.clone(),
        panel,
    }
}

/// Wheel/drag zoom plus a slider under the last panel, both driving every
/// x axis. The initial window covers the most recent `visible_bars` bars.
fn zoom_controls(layout: &LayoutPlan, bar_count: usize, visible_bars: usize) -> Vec<DataZoomOption> {
    let axes = layout.axis_indices();
    let start = if bar_count > visible_bars {
        Percent::new((bar_count - visible_bars) as f64 / bar_count as f64 * 100.0).value()
    } else {
        0.0
    };
    vec![
        DataZoomOption { kind: DataZoomKind::Inside, x_axis_index: axes.clone(), start, end: 100.0, bottom: None },
        DataZoomOption { kind: DataZoomKind::Slider, x_axis_index: axes, start, end: 100.0, bottom: Some(Percent::new(2.0)) },
    ]
}
