use indicator_chart_wasm::domain::chart::{
    ChartConfig, ChartOption, LineType, PanelKey, SeriesData, SeriesKind, build_chart_option,
};
use indicator_chart_wasm::domain::market_data::{Bar, BarSeries, IndicatorSelection, TradeLevels, TradeSide, TradeTerm};

fn rising_bars(count: usize) -> BarSeries {
    rising_bars_with_volume(count, |i| 10_000.0 + i as f64)
}

fn rising_bars_with_volume(count: usize, volume: impl Fn(usize) -> f64) -> BarSeries {
    let bars = (0..count)
        .map(|i| {
            let close = 10.0 + i as f64 * 0.25;
            Bar::new(
                format!("2024-{:02}-{:02}", 1 + i / 28, 1 + i % 28),
                close - 0.25,
                close + 0.5,
                close - 0.5,
                close,
                volume(i),
            )
        })
        .collect();
    BarSeries::new(bars, 240).unwrap()
}

fn selection(keys: &[&str]) -> IndicatorSelection {
    IndicatorSelection::parse_keys(keys).unwrap()
}

fn compose(bars: &BarSeries, keys: &[&str], levels: Option<&TradeLevels>) -> ChartOption {
    build_chart_option(bars, &selection(keys), levels, &ChartConfig::default()).unwrap()
}

#[test]
fn moving_averages_and_volume() {
    let option = compose(&rising_bars(30), &["ma", "volume"], None);

    let panels = option.panels();
    assert_eq!(panels.iter().map(|p| (p.key, p.weight)).collect::<Vec<_>>(), vec![
        (PanelKey::Main, 2),
        (PanelKey::Volume, 1)
    ]);
    assert_eq!(option.grid.len(), 2);
    assert_eq!(option.x_axis.len(), 2);
    assert_eq!(option.y_axis.len(), 2);

    let ma5 = option.find_series("ma5").unwrap();
    let ma20 = option.find_series("ma20").unwrap();
    for series in [ma5, ma20] {
        assert_eq!(series.panel, PanelKey::Main);
        assert_eq!(series.kind, SeriesKind::Line);
        assert_eq!(series.y_axis_index, 0);
        assert_eq!(series.data.len(), 30);
    }
    match &ma20.data {
        SeriesData::Values(values) => {
            assert!(values[..19].iter().all(Option::is_none));
            assert!(values[19..].iter().all(Option::is_some));
        }
        other => panic!("unexpected data {:?}", other),
    }

    let volume: Vec<_> = option.series_on(PanelKey::Volume).collect();
    assert_eq!(volume.len(), 1);
    assert_eq!(volume[0].kind, SeriesKind::Bar);
    assert_eq!(volume[0].x_axis_index, 1);

    assert_eq!(option.series_on(PanelKey::Osc).count(), 0);
}

#[test]
fn thirty_days_of_constant_volume() {
    let bars = rising_bars_with_volume(30, |_| 5_000.0);
    let option = compose(&bars, &["ma", "volume"], None);

    assert_eq!(option.panels().iter().map(|p| (p.key, p.weight)).collect::<Vec<_>>(), vec![
        (PanelKey::Main, 2),
        (PanelKey::Volume, 1)
    ]);
    assert_eq!(option.find_series("ma5").map(|s| s.panel), Some(PanelKey::Main));
    assert_eq!(option.find_series("ma20").map(|s| s.panel), Some(PanelKey::Main));

    let volume: Vec<_> = option.series_on(PanelKey::Volume).collect();
    assert_eq!(volume.len(), 1);
    assert_eq!(volume[0].kind, SeriesKind::Bar);
    assert_eq!(volume[0].data, SeriesData::Values(vec![Some(5_000.0); 30]));
    assert_eq!(option.series_on(PanelKey::Osc).count(), 0);
}

#[test]
fn candlestick_leads_the_series_list() {
    let option = compose(&rising_bars(12), &["rsi", "ma"], None);
    let first = &option.series[0];
    assert_eq!(first.kind, SeriesKind::Candlestick);
    assert_eq!(first.panel, PanelKey::Main);
    match &first.data {
        SeriesData::Ohlc(rows) => {
            assert_eq!(rows.len(), 12);
            // open, close, low, high
            assert_eq!(rows[0], [9.75, 10.0, 9.5, 10.5]);
        }
        other => panic!("unexpected data {:?}", other),
    }
}

#[test]
fn oscillators_share_one_panel() {
    let option = compose(&rising_bars(60), &["rsi", "macd", "kdj", "trix"], None);
    assert_eq!(option.panels().len(), 2);

    let osc: Vec<_> = option.series_on(PanelKey::Osc).collect();
    assert_eq!(osc.len(), 1 + 3 + 3 + 2);
    assert!(osc.iter().all(|s| s.x_axis_index == 1 && s.y_axis_index == 1));
    assert_eq!(option.find_series("macd.hist").map(|s| s.kind), Some(SeriesKind::Bar));
}

#[test]
fn empty_selection_is_a_single_candlestick_panel() {
    let option = compose(&rising_bars(5), &[], None);
    assert_eq!(option.panels().len(), 1);
    assert_eq!(option.series.len(), 1);
    assert!(option.trade_lines().next().is_none());
}

#[test]
fn no_bars_no_chart() {
    let option = build_chart_option(&BarSeries::empty(), &selection(&["ma"]), None, &ChartConfig::default());
    assert!(option.is_none());
}

#[test]
fn trade_levels_become_reference_lines() {
    let levels: TradeLevels = serde_json::from_str(
        r#"{"shortTerm":{"buy":10.5,"sell":12.0},"midTerm":{"buy":0,"sell":0},"longTerm":null}"#,
    )
    .unwrap();
    let option = compose(&rising_bars(20), &["ma"], Some(&levels));

    let lines: Vec<_> = option.trade_lines().collect();
    assert_eq!(lines.len(), 2);

    let buy = lines.iter().find(|l| l.side == TradeSide::Buy).unwrap();
    assert_eq!(buy.term, TradeTerm::ShortTerm);
    assert_eq!(buy.y_axis, 10.5);
    assert_eq!(buy.line_style.kind, LineType::Dashed);
    assert_eq!(buy.label.formatter, "Short-term Buy 10.50");

    let sell = lines.iter().find(|l| l.side == TradeSide::Sell).unwrap();
    assert_eq!(sell.y_axis, 12.0);
    assert_eq!(sell.line_style.kind, LineType::Solid);
    assert_ne!(buy.line_style.color, sell.line_style.color);
}

#[test]
fn malformed_trade_levels_draw_nothing() {
    let levels: TradeLevels = serde_json::from_str(r#"{"shortTerm":"n/a","midTerm":{"buy":"x"}}"#).unwrap();
    let option = compose(&rising_bars(20), &["ma"], Some(&levels));
    assert_eq!(option.trade_lines().count(), 0);
    assert!(option.series[0].mark_line.is_none());
}

#[test]
fn identical_inputs_compose_identical_options() {
    let bars = rising_bars(80);
    let levels: TradeLevels = serde_json::from_str(r#"{"longTerm":{"buy":20,"sell":31.25}}"#).unwrap();
    let keys = ["ma", "volume", "macd", "dmi", "cr", "psy", "dma", "brar", "kd"];

    let first = compose(&bars, &keys, Some(&levels));
    let second = compose(&bars, &keys, Some(&levels));
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn zoom_starts_on_the_most_recent_window() {
    let config = ChartConfig { visible_bars: 50, ..ChartConfig::default() };
    let option = build_chart_option(&rising_bars(200), &selection(&["volume", "rsi"]), None, &config).unwrap();
    assert_eq!(option.data_zoom.len(), 2);
    for zoom in &option.data_zoom {
        assert_eq!(zoom.start, 75.0);
        assert_eq!(zoom.end, 100.0);
        assert_eq!(zoom.x_axis_index, vec![0, 1, 2]);
    }
}

#[test]
fn serialized_option_uses_chart_library_names() {
    let option = compose(&rising_bars(10), &["volume"], None);
    let json: serde_json::Value = serde_json::from_str(&option.to_json().unwrap()).unwrap();

    assert_eq!(json["animation"], false);
    assert_eq!(json["tooltip"]["trigger"], "axis");
    assert_eq!(json["axisPointer"]["link"][0]["xAxisIndex"], "all");
    assert_eq!(json["grid"][0]["top"], "6%");
    assert_eq!(json["xAxis"][0]["type"], "category");
    assert_eq!(json["xAxis"][0]["data"][0], "2024-01-01");
    assert_eq!(json["yAxis"][1]["gridIndex"], 1);
    assert_eq!(json["series"][0]["type"], "candlestick");
    assert_eq!(json["series"][1]["type"], "bar");
    assert_eq!(json["series"][1]["xAxisIndex"], 1);
    assert_eq!(json["dataZoom"][1]["type"], "slider");
    assert!(json["series"][0].get("key").is_none());
}
