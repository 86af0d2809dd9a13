use indicator_chart_wasm::domain::chart::{ChartConfig, TooltipAggregator, build_chart_option};
use indicator_chart_wasm::domain::market_data::{Bar, BarSeries, IndicatorSelection, IndicatorSeries};
use wasm_bindgen_test::*;

fn sample_bars() -> BarSeries {
    let bars = vec![
        Bar::new("2024-03-01", 10.0, 11.0, 9.5, 10.75, 1_250.0),
        Bar::new("2024-03-04", 10.75, 12.0, 10.5, 11.5, 2_400_000.0),
        Bar::new("2024-03-05", 11.5, 11.75, 11.0, 11.25, 3_100_000_000.0),
    ];
    BarSeries::new(bars, 240).unwrap()
}

#[wasm_bindgen_test]
fn ohlc_lines_come_first() {
    let tooltip = TooltipAggregator::new(&sample_bars(), &[]);
    assert_eq!(tooltip.lines(0).unwrap(), vec![
        "2024-03-01",
        "Open: 10.00",
        "High: 11.00",
        "Low: 9.50",
        "Close: 10.75"
    ]);
    assert_eq!(tooltip.lines(3), None);
}

#[wasm_bindgen_test]
fn null_values_are_left_out() {
    let series = vec![IndicatorSeries::line("ma2", "MA2", vec![None, Some(11.126), Some(11.375)])];
    let tooltip = TooltipAggregator::new(&sample_bars(), &series);

    assert!(!tooltip.format_index(0).unwrap().contains("MA2"));
    assert!(tooltip.format_index(1).unwrap().ends_with("MA2: 11.13"));
}

#[wasm_bindgen_test]
fn missing_date_falls_back_to_the_previous_bar() {
    let tooltip = TooltipAggregator::new(&sample_bars(), &[]);
    assert_eq!(tooltip.index_of("2024-03-04"), Some(1));
    assert_eq!(tooltip.index_of("2024-03-02"), Some(0));
    assert_eq!(tooltip.index_of("2024-12-31"), Some(2));
    assert_eq!(tooltip.index_of("2023-01-01"), Some(0));

    let empty = TooltipAggregator::new(&BarSeries::empty(), &[]);
    assert_eq!(empty.index_of("2024-03-04"), None);
    assert_eq!(empty.format_date("2024-03-04"), None);
}

#[wasm_bindgen_test]
fn composed_chart_exposes_volume_and_oscillators() {
    let selection = IndicatorSelection::parse_keys(&["volume", "kdj"]).unwrap();
    let option = build_chart_option(&sample_bars(), &selection, None, &ChartConfig::default()).unwrap();
    let text = option.tooltip_data.format_date("2024-03-05").unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "2024-03-05");
    assert!(lines.contains(&"Volume: 3.10B"));
    assert!(lines.iter().any(|l| l.starts_with("K: ")));
    assert!(lines.iter().any(|l| l.starts_with("D: ")));
    assert!(lines.iter().any(|l| l.starts_with("J: ")));

    let earlier = option.tooltip_data.format_date("2024-03-04").unwrap();
    assert!(earlier.contains("Volume: 2.40M"));
    let first = option.tooltip_data.format_date("2024-03-01").unwrap();
    assert!(first.contains("Volume: 1.25K"));
}
