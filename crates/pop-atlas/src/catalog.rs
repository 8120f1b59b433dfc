//! Curated catalog of indicators and geographies.
//!
//! This is the single source of truth for what the dashboard supports. Both
//! identifier sets are closed enums, so anything past the validation boundary
//! is known-good by construction; "unknown indicator" is a parse failure, not
//! a runtime string comparison downstream.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorId {
    PopulationTotal,
    PopulationByStateLatest,
}

/// Which data-source operation feeds an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorSemantics {
    /// Points indexed by time period, in chronological order.
    TimeSeries,
    /// One point per subdivision, period carrying the geography code.
    LatestSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy)]
pub struct IndicatorDefinition {
    pub id: IndicatorId,
    pub name: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub recommended_charts: &'static [ChartKind],
}

static POPULATION_TOTAL: IndicatorDefinition = IndicatorDefinition {
    id: IndicatorId::PopulationTotal,
    name: "Total Aboriginal & Torres Strait Islander Population",
    description: "Estimated number of Aboriginal and Torres Strait Islander people \
                  living in Australia over time.",
    unit: "people",
    recommended_charts: &[ChartKind::Line],
};

static POPULATION_BY_STATE_LATEST: IndicatorDefinition = IndicatorDefinition {
    id: IndicatorId::PopulationByStateLatest,
    name: "Population by State/Territory (Latest)",
    description: "Latest available estimated Aboriginal and Torres Strait Islander \
                  population by state and territory.",
    unit: "people",
    recommended_charts: &[ChartKind::Bar],
};

impl IndicatorId {
    pub const fn ordered() -> [Self; 2] {
        [Self::PopulationTotal, Self::PopulationByStateLatest]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PopulationTotal => "population_total",
            Self::PopulationByStateLatest => "population_by_state_latest",
        }
    }

    /// Exact-match lookup against the allowlist; anything else is unknown.
    pub fn from_code(raw: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|id| id.as_str() == raw)
    }

    pub const fn definition(self) -> &'static IndicatorDefinition {
        match self {
            Self::PopulationTotal => &POPULATION_TOTAL,
            Self::PopulationByStateLatest => &POPULATION_BY_STATE_LATEST,
        }
    }

    pub const fn semantics(self) -> IndicatorSemantics {
        match self {
            Self::PopulationTotal => IndicatorSemantics::TimeSeries,
            Self::PopulationByStateLatest => IndicatorSemantics::LatestSnapshot,
        }
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GeoCode {
    Aus,
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
    Nt,
    Act,
}

#[derive(Debug, Clone, Copy)]
pub struct GeoDefinition {
    pub code: GeoCode,
    pub name: &'static str,
}

// Indexed by variant discriminant; keep in sync with the enum order.
static GEO_DEFINITIONS: [GeoDefinition; 9] = [
    GeoDefinition { code: GeoCode::Aus, name: "Australia" },
    GeoDefinition { code: GeoCode::Nsw, name: "New South Wales" },
    GeoDefinition { code: GeoCode::Vic, name: "Victoria" },
    GeoDefinition { code: GeoCode::Qld, name: "Queensland" },
    GeoDefinition { code: GeoCode::Sa, name: "South Australia" },
    GeoDefinition { code: GeoCode::Wa, name: "Western Australia" },
    GeoDefinition { code: GeoCode::Tas, name: "Tasmania" },
    GeoDefinition { code: GeoCode::Nt, name: "Northern Territory" },
    GeoDefinition { code: GeoCode::Act, name: "Australian Capital Territory" },
];

impl GeoCode {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Aus,
            Self::Nsw,
            Self::Vic,
            Self::Qld,
            Self::Sa,
            Self::Wa,
            Self::Tas,
            Self::Nt,
            Self::Act,
        ]
    }

    /// The eight state/territory codes, excluding the national aggregate.
    pub const fn subdivisions() -> [Self; 8] {
        [
            Self::Nsw,
            Self::Vic,
            Self::Qld,
            Self::Sa,
            Self::Wa,
            Self::Tas,
            Self::Nt,
            Self::Act,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aus => "AUS",
            Self::Nsw => "NSW",
            Self::Vic => "VIC",
            Self::Qld => "QLD",
            Self::Sa => "SA",
            Self::Wa => "WA",
            Self::Tas => "TAS",
            Self::Nt => "NT",
            Self::Act => "ACT",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|geo| geo.as_str() == raw)
    }

    pub fn definition(self) -> &'static GeoDefinition {
        &GEO_DEFINITIONS[self as usize]
    }

    pub const fn is_national(self) -> bool {
        matches!(self, Self::Aus)
    }
}

impl fmt::Display for GeoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_codes_round_trip() {
        for id in IndicatorId::ordered() {
            assert_eq!(IndicatorId::from_code(id.as_str()), Some(id));
        }
        assert_eq!(IndicatorId::from_code("median_age"), None);
        assert_eq!(IndicatorId::from_code("POPULATION_TOTAL"), None);
    }

    #[test]
    fn geo_codes_round_trip() {
        for geo in GeoCode::ordered() {
            assert_eq!(GeoCode::from_code(geo.as_str()), Some(geo));
            assert_eq!(geo.definition().code, geo);
        }
        assert_eq!(GeoCode::from_code("nsw"), None);
        assert_eq!(GeoCode::from_code("NZ"), None);
    }

    #[test]
    fn subdivisions_exclude_the_national_code() {
        let subdivisions = GeoCode::subdivisions();
        assert_eq!(subdivisions.len(), 8);
        assert!(!subdivisions.contains(&GeoCode::Aus));
    }

    #[test]
    fn wire_names_match_the_catalog_codes() {
        let id = serde_json::to_value(IndicatorId::PopulationByStateLatest).unwrap();
        assert_eq!(id, "population_by_state_latest");
        let geo = serde_json::to_value(GeoCode::Act).unwrap();
        assert_eq!(geo, "ACT");
    }

    #[test]
    fn definitions_carry_display_metadata() {
        let definition = IndicatorId::PopulationTotal.definition();
        assert_eq!(definition.unit, "people");
        assert_eq!(definition.recommended_charts, &[ChartKind::Line]);
        assert_eq!(GeoCode::Wa.definition().name, "Western Australia");
    }
}
