//! End-to-end specifications for the validate -> source -> normalize pipeline
//! over the public service facade, using the real mock dataset.

use pop_atlas::catalog::{GeoCode, IndicatorId};
use pop_atlas::render::SeriesView;
use pop_atlas::service::SeriesService;
use pop_atlas::source::MockPopulationSource;
use std::collections::BTreeMap;
use std::sync::Arc;

fn service() -> SeriesService {
    SeriesService::new(Arc::new(MockPopulationSource))
}

#[test]
fn national_population_series_spans_2016_to_2022() {
    let series = service().fetch("population_total", "AUS").expect("valid request");

    assert_eq!(series.indicator_id, IndicatorId::PopulationTotal);
    assert_eq!(series.geo_code, GeoCode::Aus);
    assert_eq!(series.unit, "people");
    assert_eq!(series.points.len(), 7);
    assert_eq!(series.points.first().map(|p| p.period.as_str()), Some("2016"));
    assert_eq!(series.points.last().map(|p| p.period.as_str()), Some("2022"));
    assert_eq!(series.points.last().map(|p| p.value), Some(889_200.0));
}

#[test]
fn state_snapshot_contains_exactly_one_point_per_subdivision() {
    let series = service()
        .fetch("population_by_state_latest", "AUS")
        .expect("valid request");

    assert_eq!(series.points.len(), 8);

    let by_code: BTreeMap<&str, f64> = series
        .points
        .iter()
        .map(|point| (point.period.as_str(), point.value))
        .collect();
    // No duplicate periods collapsed away.
    assert_eq!(by_code.len(), 8);

    let expected = [
        ("NSW", 278_900.0),
        ("VIC", 95_000.0),
        ("QLD", 237_800.0),
        ("SA", 54_000.0),
        ("WA", 112_000.0),
        ("TAS", 28_500.0),
        ("NT", 76_000.0),
        ("ACT", 10_200.0),
    ];
    for (code, value) in expected {
        assert_eq!(by_code.get(code), Some(&value), "value for {code}");
    }

    // Every period is a known subdivision code, never the national code.
    for point in &series.points {
        let geo = GeoCode::from_code(&point.period).expect("period is a catalog geo code");
        assert!(!geo.is_national());
    }
}

#[test]
fn repeated_requests_yield_identical_points_and_unit() {
    let service = service();
    let first = service.fetch("population_total", "AUS").unwrap();
    let second = service.fetch("population_total", "AUS").unwrap();
    assert_eq!(first.points, second.points);
    assert_eq!(first.unit, second.unit);
    // retrieved_at may legitimately differ between the two calls.
}

#[test]
fn provenance_flows_through_to_the_normalized_series() {
    let series = service().fetch("population_total", "AUS").unwrap();
    assert_eq!(series.source_name, "Mock dataset (replace with ABS later)");
    assert_eq!(series.last_updated.map(|d| d.to_string()), Some("2022-12-31".to_string()));
    assert!(series.source_url.is_none());
}

#[test]
fn rendered_snapshot_summary_names_both_extremes() {
    let series = service().fetch("population_by_state_latest", "AUS").unwrap();
    let view = SeriesView::build(&series, "Population by state/territory");

    assert_eq!(view.rows.len(), 8);
    assert_eq!(view.rows[0].label, "New South Wales");
    assert!(view.summary.contains("highest is New South Wales at 278,900 people"));
    assert!(view.summary.contains("lowest is Australian Capital Territory at 10,200 people"));
}

#[test]
fn illegal_combinations_never_reach_a_series() {
    let service = service();
    for (indicator, geo) in [
        ("population_total", "NSW"),
        ("population_by_state_latest", "VIC"),
        ("bogus", "AUS"),
        ("population_total", "bogus"),
    ] {
        assert!(service.fetch(indicator, geo).is_err(), "{indicator}/{geo} must be rejected");
    }
}
