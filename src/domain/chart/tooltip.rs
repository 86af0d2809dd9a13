use crate::domain::market_data::{BarSeries, IndicatorSeries, ValueFormat};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
struct TooltipColumn {
    label: String,
    format: ValueFormat,
    values: Vec<Option<f64>>,
}

/// Hover text source, built once per recomputation.
///
/// Holds its own copy of the OHLC rows and of every labeled series so a hover
/// is a map lookup plus formatting of one row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipAggregator {
    date_index: HashMap<String, usize>,
    dates: Vec<String>,
    ohlc: Vec<[f64; 4]>,
    columns: Vec<TooltipColumn>,
}

impl TooltipAggregator {
    pub fn new(bars: &BarSeries, series: &[IndicatorSeries]) -> Self {
        let columns = series
            .iter()
            .filter_map(|s| {
                s.label.as_ref().map(|label| TooltipColumn {
                    label: label.clone(),
                    format: s.format,
                    values: s.values.clone(),
                })
            })
            .collect();

        Self {
            date_index: bars.date_index(),
            dates: bars.dates(),
            ohlc: bars.bars().iter().map(|b| [b.open, b.high, b.low, b.close]).collect(),
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Bar index for `date`: exact match, otherwise the latest bar not after it.
    pub fn index_of(&self, date: &str) -> Option<usize> {
        if let Some(&index) = self.date_index.get(date) {
            return Some(index);
        }
        if self.dates.is_empty() {
            return None;
        }
        let after = self.dates.partition_point(|d| d.as_str() <= date);
        Some(after.saturating_sub(1))
    }

    pub fn format_date(&self, date: &str) -> Option<String> {
        self.index_of(date).and_then(|index| self.format_index(index))
    }

    pub fn format_index(&self, index: usize) -> Option<String> {
        self.lines(index).map(|lines| lines.join("\n"))
    }

    /// Date, then OHLC, then every labeled series with a value at `index`.
    pub fn lines(&self, index: usize) -> Option<Vec<String>> {
        let date = self.dates.get(index)?;
        let [open, high, low, close] = self.ohlc.get(index)?;

        let mut lines = vec![
            date.clone(),
            format!("Open: {:.2}", open),
            format!("High: {:.2}", high),
            format!("Low: {:.2}", low),
            format!("Close: {:.2}", close),
        ];
        lines.extend(self.columns.iter().filter_map(|column| {
            column
                .values
                .get(index)
                .copied()
                .flatten()
                .map(|value| format!("{}: {}", column.label, column.format.format(value)))
        }));
        Some(lines)
    }
}
