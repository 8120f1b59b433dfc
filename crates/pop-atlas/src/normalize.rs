//! Raw source payloads into the canonical [`IndicatorSeries`] shape.
//!
//! Pure pass-through: point order is preserved exactly as the source gave it,
//! the unit comes from the catalog definition, and `retrieved_at` is supplied
//! by the caller so these functions stay deterministic under test. Missing
//! values are never invented or interpolated; an empty payload is [`NoData`].
//!
//! [`NoData`]: NormalizeError::NoData

use crate::catalog::IndicatorId;
use crate::series::{IndicatorSeries, SeriesPoint};
use crate::source::{Provenance, RawSeries, RawSnapshot};
use crate::validate::ValidatedQuery;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("the data source returned no points")]
    NoData,
}

fn build(
    query: ValidatedQuery,
    points: Vec<SeriesPoint>,
    provenance: Provenance,
    retrieved_at: DateTime<Utc>,
) -> Result<IndicatorSeries, NormalizeError> {
    if points.is_empty() {
        return Err(NormalizeError::NoData);
    }
    Ok(IndicatorSeries {
        indicator_id: query.indicator_id,
        geo_code: query.geo_code,
        unit: unit_for(query.indicator_id),
        points,
        source_name: provenance.source_name,
        source_url: provenance.source_url,
        retrieved_at,
        last_updated: provenance.last_updated,
    })
}

fn unit_for(indicator: IndicatorId) -> String {
    indicator.definition().unit.to_string()
}

/// Time-series points pass through in the source's given order; the source is
/// trusted to have them chronological already.
pub fn normalize_time_series(
    query: ValidatedQuery,
    raw: RawSeries,
    retrieved_at: DateTime<Utc>,
) -> Result<IndicatorSeries, NormalizeError> {
    let points = raw
        .points
        .into_iter()
        .map(|point| SeriesPoint { period: point.period, value: point.value })
        .collect();
    build(query, points, raw.provenance, retrieved_at)
}

/// Snapshot values become points with `period` carrying the subdivision code,
/// keeping one consistent shape across chart types. Order stays source-defined.
pub fn normalize_snapshot(
    query: ValidatedQuery,
    raw: RawSnapshot,
    retrieved_at: DateTime<Utc>,
) -> Result<IndicatorSeries, NormalizeError> {
    let points = raw
        .values
        .into_iter()
        .map(|(geo, value)| SeriesPoint { period: geo.as_str().to_string(), value })
        .collect();
    build(query, points, raw.provenance, retrieved_at)
}
