//! Service facade composing validation, the data source, and the normalizer.

use crate::catalog::IndicatorSemantics;
use crate::normalize::{normalize_snapshot, normalize_time_series, NormalizeError};
use crate::series::IndicatorSeries;
use crate::source::{DataSource, SourceError};
use crate::validate::{validate, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Request-level error taxonomy. Validation failures are terminal and never
/// retried; `SourceUnavailable` is the one category where a bounded retry is
/// appropriate (and that retry lives in the client layer, not here).
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Indicator not implemented yet.")]
    NotImplemented,
    #[error("upstream source unavailable: {reason}")]
    SourceUnavailable { reason: String },
}

impl From<SourceError> for SeriesError {
    fn from(value: SourceError) -> Self {
        match value {
            SourceError::Unsupported(_) => Self::NotImplemented,
            SourceError::Unavailable { reason } => Self::SourceUnavailable { reason },
        }
    }
}

impl From<NormalizeError> for SeriesError {
    fn from(value: NormalizeError) -> Self {
        match value {
            NormalizeError::NoData => Self::NotImplemented,
        }
    }
}

impl SeriesError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            Self::SourceUnavailable { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for SeriesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Stateless per-request pipeline over a shared, read-only data source.
#[derive(Clone)]
pub struct SeriesService {
    source: Arc<dyn DataSource>,
}

impl SeriesService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// validate -> source -> normalize. A series is either fully normalized
    /// or not returned at all; there are no partial responses.
    pub fn fetch(&self, raw_indicator: &str, raw_geo: &str) -> Result<IndicatorSeries, SeriesError> {
        let query = validate(raw_indicator, raw_geo)?;
        let retrieved_at = Utc::now();

        let series = match query.indicator_id.semantics() {
            IndicatorSemantics::TimeSeries => {
                let raw = self.source.time_series(query.indicator_id).map_err(|err| {
                    warn!(indicator = %query.indicator_id, %err, "time series fetch failed");
                    SeriesError::from(err)
                })?;
                normalize_time_series(query, raw, retrieved_at)?
            }
            IndicatorSemantics::LatestSnapshot => {
                let raw = self.source.latest_snapshot(query.indicator_id).map_err(|err| {
                    warn!(indicator = %query.indicator_id, %err, "snapshot fetch failed");
                    SeriesError::from(err)
                })?;
                normalize_snapshot(query, raw, retrieved_at)?
            }
        };

        Ok(series)
    }
}
