use indicator_chart_wasm::domain::chart::{ChartConfig, Color, Palette};
use indicator_chart_wasm::domain::errors::AppError;
use indicator_chart_wasm::domain::market_data::{
    Bar, BarSeries, IndicatorKind, IndicatorSelection, TradeLevels, TradeTerm, services::DataValidationService,
};

#[test]
fn bars_deserialize_from_provider_json() {
    let bars: Vec<Bar> = serde_json::from_str(
        r#"[{"date":"2024-07-01","open":5,"high":6.5,"low":4.75,"close":6,"volume":12000}]"#,
    )
    .unwrap();
    assert_eq!(bars[0], Bar::new("2024-07-01", 5.0, 6.5, 4.75, 6.0, 12_000.0));
}

#[test]
fn validation_names_the_offending_bar() {
    let service = DataValidationService::new();

    let inverted = Bar::new("2024-07-02", 5.0, 4.0, 6.0, 5.0, 1.0);
    match service.validate_bar(&inverted) {
        Err(AppError::ValidationError(msg)) => assert!(msg.contains("2024-07-02")),
        other => panic!("unexpected {:?}", other),
    }

    let no_date = Bar::new(" ", 5.0, 6.0, 4.0, 5.0, 1.0);
    assert!(service.validate_bar(&no_date).is_err());
    let negative_volume = Bar::new("2024-07-02", 5.0, 6.0, 4.0, 5.0, -1.0);
    assert!(service.validate_bar(&negative_volume).is_err());
    let not_finite = Bar::new("2024-07-02", f64::NAN, 6.0, 4.0, 5.0, 1.0);
    assert!(service.validate_bar(&not_finite).is_err());
}

#[test]
fn duplicate_dates_are_not_chronological() {
    let bars = vec![
        Bar::new("2024-07-01", 5.0, 6.0, 4.0, 5.0, 1.0),
        Bar::new("2024-07-01", 5.0, 6.0, 4.0, 5.0, 1.0),
    ];
    assert!(BarSeries::new(bars, 10).is_err());
}

#[test]
fn selection_round_trips_as_a_key_list() {
    let selection: IndicatorSelection = serde_json::from_str(r#"["rsi","ma","volume"]"#).unwrap();
    assert_eq!(selection.len(), 3);
    assert_eq!(serde_json::to_string(&selection).unwrap(), r#"["ma","volume","rsi"]"#);
}

#[test]
fn lenient_selection_skips_unknown_keys() {
    let selection = IndicatorSelection::from_keys_lenient(&["ma", "ichimoku", " KDJ "]);
    assert_eq!(selection.iter().collect::<Vec<_>>(), vec![IndicatorKind::MovingAverage, IndicatorKind::Kdj]);

    let strict = IndicatorSelection::parse_keys(&["ma", "ichimoku"]);
    assert!(matches!(strict, Err(AppError::ValidationError(_))));
}

#[test]
fn toggle_flips_membership() {
    let mut selection = IndicatorSelection::new();
    assert!(selection.toggle(IndicatorKind::Cr));
    assert!(selection.has_oscillator());
    assert!(!selection.toggle(IndicatorKind::Cr));
    assert!(selection.is_empty());

    selection.insert(IndicatorKind::Volume);
    assert!(!selection.has_oscillator());
}

#[test]
fn placement_per_kind() {
    assert!(!IndicatorKind::MovingAverage.is_oscillator());
    assert!(!IndicatorKind::Volume.is_oscillator());
    assert_eq!(IndicatorKind::oscillators().count(), 10);
}

#[test]
fn trade_levels_ignore_numeric_strings() {
    let levels: TradeLevels =
        serde_json::from_str(r#"{"shortTerm":{"buy":"10.5","sell":11},"longTerm":{"buy":9,"sell":null}}"#).unwrap();
    let all = levels.levels();
    assert_eq!(all.iter().map(|l| l.term).collect::<Vec<_>>(), vec![TradeTerm::ShortTerm, TradeTerm::LongTerm]);
    assert_eq!(all[0].buy_price(), None);
    assert_eq!(all[0].sell_price(), Some(11.0));
    assert_eq!(all[1].sell_price(), None);
}

#[test]
fn config_rejects_margins_without_room() {
    let err = ChartConfig::from_json(r#"{"layout":{"top":50,"bottom":45}}"#).unwrap_err();
    assert!(matches!(err, AppError::ConfigurationError(_)));

    let err = ChartConfig::from_json(r#"{"visibleBars":0}"#).unwrap_err();
    assert!(matches!(err, AppError::ConfigurationError(_)));

    assert!(matches!(ChartConfig::from_json("[1,2]"), Err(AppError::ConfigurationError(_))));
}

#[test]
fn palette_overrides_accept_css_colors() {
    let config = ChartConfig::from_json(r##"{"palette":{"up":"#00ff00","down":"#ff0000"}}"##).unwrap();
    assert_eq!(config.palette.up, Color::from_hex(0x00FF00));
    assert_eq!(config.palette.down.to_css(), "#ff0000");
    assert_eq!(config.palette.buy, Palette::default().buy);
}
