use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use indicator_chart_wasm::domain::chart::{ChartConfig, build_chart_option};
use indicator_chart_wasm::domain::market_data::{Bar, BarSeries, IndicatorKind, IndicatorParams, IndicatorSelection};
use std::hint::black_box;
use std::time::Duration;
use strum::IntoEnumIterator;

/// Synthetic daily bars with a slow trend, a swing and some noise
fn generate_test_bars(count: usize) -> Vec<Bar> {
    let mut bars = Vec::with_capacity(count);
    let mut base_price = 100.0;

    for i in 0..count {
        let trend = (i as f64 * 0.01).sin() * 8.0;
        let swing = (i as f64 * 0.2).sin() * 2.0;
        let noise = ((i as f64 * 0.5).sin() + (i as f64 * 1.3).cos()) * 0.4;

        let open = base_price + trend + swing + noise;
        let close = open + (i as f64 * 0.3).cos();
        let high = open.max(close) + (i as f64 * 0.7).sin().abs();
        let low = open.min(close) - (i as f64 * 0.9).cos().abs();
        let volume = 50_000.0 + (i as f64 * 0.4).sin().abs() * 20_000.0;

        let day = i as u64;
        let date = format!("{:04}-{:02}-{:02}", 2000 + day / 336, 1 + (day / 28) % 12, 1 + day % 28);
        bars.push(Bar::new(date, open, high, low, close, volume));
        base_price = close * 0.999 + open * 0.001;
    }

    bars
}

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");
    group.measurement_time(Duration::from_secs(5));
    let params = IndicatorParams::default();

    for bar_count in [240usize, 2_000] {
        let series = BarSeries::new(generate_test_bars(bar_count), bar_count).unwrap();
        for kind in IndicatorKind::iter() {
            group.bench_with_input(BenchmarkId::new(kind.key(), bar_count), &series, |b, series| {
                b.iter(|| black_box(kind.compute(series, &params)))
            });
        }
    }

    group.finish();
}

fn bench_chart_option(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_option");
    let config = ChartConfig::default();
    let series = BarSeries::new(generate_test_bars(config.max_bars), config.max_bars).unwrap();
    let everything: IndicatorSelection = IndicatorKind::iter().collect();
    let candles_only = IndicatorSelection::new();

    group.bench_function("all_indicators", |b| {
        b.iter(|| black_box(build_chart_option(&series, &everything, None, &config)))
    });
    group.bench_function("candles_only", |b| {
        b.iter(|| black_box(build_chart_option(&series, &candles_only, None, &config)))
    });

    let option = build_chart_option(&series, &everything, None, &config).unwrap();
    group.bench_function("tooltip_lookup", |b| {
        b.iter(|| black_box(option.tooltip_data.format_date(black_box("2000-05-14"))))
    });
    group.bench_function("serialize", |b| b.iter(|| black_box(option.to_json().unwrap())));

    group.finish();
}

criterion_group!(benches, bench_indicators, bench_chart_option);
criterion_main!(benches);
