//! CLI views over the catalog and the in-process data source, for quick
//! inspection without starting the HTTP server.

use clap::Args;
use pop_atlas::catalog::{GeoCode, IndicatorId};
use pop_atlas::error::AppError;
use pop_atlas::render::SeriesView;
use pop_atlas::service::SeriesService;
use pop_atlas::source::MockPopulationSource;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SeriesArgs {
    /// Indicator identifier, e.g. population_total
    #[arg(long)]
    pub(crate) indicator: String,
    /// Geography code (defaults to the national scope)
    #[arg(long, default_value = "AUS")]
    pub(crate) geo: String,
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    println!("Indicators");
    println!("----------");
    for id in IndicatorId::ordered() {
        let definition = id.definition();
        let charts: Vec<&str> = definition
            .recommended_charts
            .iter()
            .map(|kind| match kind {
                pop_atlas::catalog::ChartKind::Line => "line",
                pop_atlas::catalog::ChartKind::Bar => "bar",
            })
            .collect();
        println!("  {:<28} {} [{}]", id.as_str(), definition.name, charts.join(", "));
        println!("  {:<28} unit: {}", "", definition.unit);
    }

    println!();
    println!("Geographies");
    println!("-----------");
    for geo in GeoCode::ordered() {
        let marker = if geo.is_national() { " (national)" } else { "" };
        println!("  {:<6} {}{}", geo.as_str(), geo.definition().name, marker);
    }

    Ok(())
}

pub(crate) fn run_series(args: SeriesArgs) -> Result<(), AppError> {
    let service = SeriesService::new(Arc::new(MockPopulationSource));
    let series = service.fetch(&args.indicator, &args.geo)?;
    let title = series.indicator_id.definition().name;
    let view = SeriesView::build(&series, title);

    println!("{}", view.summary);
    println!();
    let label_width = view
        .rows
        .iter()
        .map(|row| row.label.len())
        .max()
        .unwrap_or(0);
    for row in &view.rows {
        println!("  {:<width$}  {:>12}", row.label, row.display_value, width = label_width);
    }
    println!();
    println!(
        "Source: {} (retrieved {})",
        series.source_name,
        series.retrieved_at.to_rfc3339()
    );
    if let Some(last_updated) = series.last_updated {
        println!("Last updated: {last_updated}");
    }

    Ok(())
}
