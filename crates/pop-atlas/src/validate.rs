//! Request validation against the catalog allowlists.
//!
//! Membership ("is this a real code") and compatibility ("is this code usable
//! with this indicator") are checked in one step so that every illegal
//! combination is rejected before the data layer is ever reached.

use crate::catalog::{GeoCode, IndicatorId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub indicator_id: IndicatorId,
    pub geo_code: GeoCode,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown indicatorId '{0}'; expected one of the catalog identifiers")]
    UnknownIndicator(String),
    #[error("unknown geoCode '{0}'; expected AUS or a state/territory code")]
    UnknownGeo(String),
    #[error("{indicator} currently supports geoCode=AUS only (got '{geo}')")]
    UnsupportedGeoForIndicator { indicator: IndicatorId, geo: GeoCode },
}

/// Pure function over two raw strings and the static catalog.
pub fn validate(raw_indicator: &str, raw_geo: &str) -> Result<ValidatedQuery, ValidationError> {
    let indicator_id = IndicatorId::from_code(raw_indicator)
        .ok_or_else(|| ValidationError::UnknownIndicator(raw_indicator.to_string()))?;
    let geo_code = GeoCode::from_code(raw_geo)
        .ok_or_else(|| ValidationError::UnknownGeo(raw_geo.to_string()))?;

    // Indicator-specific geography policy. population_total is national-scope
    // only in v1; population_by_state_latest returns all subdivisions, so the
    // national code is the only sensible request scope for it too.
    let geo_allowed = match indicator_id {
        IndicatorId::PopulationTotal | IndicatorId::PopulationByStateLatest => {
            geo_code.is_national()
        }
    };
    if !geo_allowed {
        return Err(ValidationError::UnsupportedGeoForIndicator {
            indicator: indicator_id,
            geo: geo_code,
        });
    }

    Ok(ValidatedQuery { indicator_id, geo_code })
}
