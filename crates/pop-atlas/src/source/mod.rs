//! The swappable data-source seam.
//!
//! Everything upstream of the normalizer goes through [`DataSource`]. The
//! mock implementation in [`mock`] and any future ABS/AIHW adapter are
//! interchangeable behind this trait without touching the validator or the
//! normalizer.

pub mod mock;

use crate::catalog::{GeoCode, IndicatorId};
use chrono::NaiveDate;

pub use mock::MockPopulationSource;

/// Static attribution attached to everything a source returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub source_name: String,
    pub source_url: Option<String>,
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    pub period: String,
    pub value: f64,
}

/// A raw time series, in the source's given order. Sources are expected to
/// return chronologically ordered points; nothing in the data layer re-sorts.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub points: Vec<RawPoint>,
    pub provenance: Provenance,
}

/// Latest per-subdivision values. Ordering is source-defined and carries no
/// guarantee; sorting for display belongs to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSnapshot {
    pub values: Vec<(GeoCode, f64)>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("no data branch implemented for indicator '{0}'")]
    Unsupported(IndicatorId),
    #[error("upstream source unavailable: {reason}")]
    Unavailable { reason: String },
}

pub trait DataSource: Send + Sync {
    fn time_series(&self, indicator: IndicatorId) -> Result<RawSeries, SourceError>;
    fn latest_snapshot(&self, indicator: IndicatorId) -> Result<RawSnapshot, SourceError>;
}
