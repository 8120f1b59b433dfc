//! Canonical normalized series shape.
//!
//! Every data source, mock or real, ultimately produces an
//! [`IndicatorSeries`]; charts, tables, and the HTTP payload all consume this
//! one shape. Instances are value objects: constructed once by the
//! normalizer, never mutated afterwards.

use crate::catalog::{GeoCode, IndicatorId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One (label, value) pair. `period` is a time label ("2016") for
/// time-series indicators and a geography code ("NSW") for by-subdivision
/// snapshots; the two are never mixed within one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSeries {
    pub indicator_id: IndicatorId,
    pub geo_code: GeoCode,
    /// Always matches the catalog definition for `indicator_id`.
    pub unit: String,
    pub points: Vec<SeriesPoint>,
    pub source_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub retrieved_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}
