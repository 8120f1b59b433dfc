//! Display views over a normalized series.
//!
//! Formatting and sorting-for-display only; no computation beyond picking the
//! endpoint or extremal values for the one-line summary. The summary line is
//! written for assistive technology and always names the unit, and the table
//! enumerates every point as the full fallback for the visual chart.

use crate::catalog::{GeoCode, IndicatorSemantics};
use crate::series::IndicatorSeries;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub value: f64,
    pub display_value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesView {
    pub title: String,
    pub unit: String,
    pub summary: String,
    pub rows: Vec<TableRow>,
}

impl SeriesView {
    pub fn build(series: &IndicatorSeries, title: impl Into<String>) -> Self {
        let title = title.into();
        match series.indicator_id.semantics() {
            IndicatorSemantics::TimeSeries => Self::time_series_view(series, title),
            IndicatorSemantics::LatestSnapshot => Self::snapshot_view(series, title),
        }
    }

    fn time_series_view(series: &IndicatorSeries, title: String) -> Self {
        let rows: Vec<TableRow> = series
            .points
            .iter()
            .map(|point| TableRow {
                label: point.period.clone(),
                value: point.value,
                display_value: format_value(point.value),
            })
            .collect();

        let summary = match (series.points.first(), series.points.last()) {
            (Some(first), Some(last)) if series.points.len() > 1 => {
                let direction = if last.value > first.value {
                    "rose"
                } else if last.value < first.value {
                    "fell"
                } else {
                    "held steady"
                };
                format!(
                    "{title}: {direction} from {} {unit} in {} to {} {unit} in {}.",
                    format_value(first.value),
                    first.period,
                    format_value(last.value),
                    last.period,
                    unit = series.unit,
                )
            }
            (Some(only), _) => format!(
                "{title}: {} {} in {}.",
                format_value(only.value),
                series.unit,
                only.period
            ),
            _ => format!("{title}: no data points."),
        };

        Self { title, unit: series.unit.clone(), summary, rows }
    }

    fn snapshot_view(series: &IndicatorSeries, title: String) -> Self {
        // Descending by value for display; the underlying series order is the
        // source's and is left untouched.
        let mut rows: Vec<TableRow> = series
            .points
            .iter()
            .map(|point| TableRow {
                label: subdivision_label(&point.period),
                value: point.value,
                display_value: format_value(point.value),
            })
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));

        let summary = match (rows.first(), rows.last()) {
            (Some(highest), Some(lowest)) if rows.len() > 1 => format!(
                "{title}: highest is {} at {} {unit}; lowest is {} at {} {unit}.",
                highest.label,
                highest.display_value,
                lowest.label,
                lowest.display_value,
                unit = series.unit,
            ),
            (Some(only), _) => format!(
                "{title}: {} at {} {}.",
                only.label, only.display_value, series.unit
            ),
            _ => format!("{title}: no data points."),
        };

        Self { title, unit: series.unit.clone(), summary, rows }
    }
}

/// Geography codes used as pseudo-periods render as their display names.
fn subdivision_label(period: &str) -> String {
    match GeoCode::from_code(period) {
        Some(geo) => geo.definition().name.to_string(),
        None => period.to_string(),
    }
}

/// Thousands-grouped display values; fractional parts keep one decimal.
fn format_value(value: f64) -> String {
    let negative = value < 0.0;
    let magnitude = value.abs();
    let whole = magnitude.trunc() as u64;
    let mut grouped = String::new();
    let digits = whole.to_string();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let fraction = magnitude.fract();
    let mut rendered = if fraction > f64::EPSILON {
        format!("{grouped}.{:01.0}", fraction * 10.0)
    } else {
        grouped
    };
    if negative {
        rendered.insert(0, '-');
    }
    rendered
}
