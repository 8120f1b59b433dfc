//! Static mock dataset standing in for the real ABS/AIHW adapters.
//!
//! Small, plausible-shaped numbers so the dashboard works end to end today.
//! Not authoritative; the swap to a real adapter happens behind
//! [`DataSource`](super::DataSource) and touches nothing else.

use super::{DataSource, Provenance, RawPoint, RawSeries, RawSnapshot, SourceError};
use crate::catalog::{GeoCode, IndicatorId};
use chrono::NaiveDate;

const AUS_POPULATION_OVER_TIME: [(&str, f64); 7] = [
    ("2016", 798_400.0),
    ("2017", 812_700.0),
    ("2018", 826_000.0),
    ("2019", 840_100.0),
    ("2020", 855_000.0),
    ("2021", 871_600.0),
    ("2022", 889_200.0),
];

const STATE_LATEST: [(GeoCode, f64); 8] = [
    (GeoCode::Nsw, 278_900.0),
    (GeoCode::Vic, 95_000.0),
    (GeoCode::Qld, 237_800.0),
    (GeoCode::Sa, 54_000.0),
    (GeoCode::Wa, 112_000.0),
    (GeoCode::Tas, 28_500.0),
    (GeoCode::Nt, 76_000.0),
    (GeoCode::Act, 10_200.0),
];

#[derive(Debug, Default, Clone)]
pub struct MockPopulationSource;

impl MockPopulationSource {
    fn provenance() -> Provenance {
        Provenance {
            source_name: "Mock dataset (replace with ABS later)".to_string(),
            source_url: None,
            last_updated: NaiveDate::from_ymd_opt(2022, 12, 31),
        }
    }
}

impl DataSource for MockPopulationSource {
    fn time_series(&self, indicator: IndicatorId) -> Result<RawSeries, SourceError> {
        match indicator {
            IndicatorId::PopulationTotal => Ok(RawSeries {
                points: AUS_POPULATION_OVER_TIME
                    .iter()
                    .map(|(period, value)| RawPoint {
                        period: (*period).to_string(),
                        value: *value,
                    })
                    .collect(),
                provenance: Self::provenance(),
            }),
            other => Err(SourceError::Unsupported(other)),
        }
    }

    fn latest_snapshot(&self, indicator: IndicatorId) -> Result<RawSnapshot, SourceError> {
        match indicator {
            IndicatorId::PopulationByStateLatest => Ok(RawSnapshot {
                values: STATE_LATEST.to_vec(),
                provenance: Self::provenance(),
            }),
            other => Err(SourceError::Unsupported(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_series_is_chronological_and_ends_in_2022() {
        let raw = MockPopulationSource
            .time_series(IndicatorId::PopulationTotal)
            .expect("mock has national totals");
        assert_eq!(raw.points.len(), 7);
        assert_eq!(raw.points.first().map(|p| p.period.as_str()), Some("2016"));
        assert_eq!(raw.points.last().map(|p| p.value), Some(889_200.0));
        let mut periods: Vec<_> = raw.points.iter().map(|p| p.period.clone()).collect();
        let given = periods.clone();
        periods.sort();
        assert_eq!(periods, given);
    }

    #[test]
    fn snapshot_covers_every_subdivision_exactly_once() {
        let raw = MockPopulationSource
            .latest_snapshot(IndicatorId::PopulationByStateLatest)
            .expect("mock has state snapshot");
        let mut codes: Vec<_> = raw.values.iter().map(|(code, _)| *code).collect();
        codes.sort_by_key(|code| code.as_str());
        let mut expected = GeoCode::subdivisions().to_vec();
        expected.sort_by_key(|code| code.as_str());
        assert_eq!(codes, expected);
    }

    #[test]
    fn wrong_operation_for_an_indicator_is_unsupported() {
        assert_eq!(
            MockPopulationSource.time_series(IndicatorId::PopulationByStateLatest),
            Err(SourceError::Unsupported(IndicatorId::PopulationByStateLatest))
        );
        assert_eq!(
            MockPopulationSource.latest_snapshot(IndicatorId::PopulationTotal),
            Err(SourceError::Unsupported(IndicatorId::PopulationTotal))
        );
    }

    #[test]
    fn provenance_names_the_mock_and_its_vintage() {
        let provenance = MockPopulationSource::provenance();
        assert_eq!(provenance.source_name, "Mock dataset (replace with ABS later)");
        assert_eq!(provenance.last_updated, NaiveDate::from_ymd_opt(2022, 12, 31));
        assert_eq!(provenance.source_url, None);
    }
}
