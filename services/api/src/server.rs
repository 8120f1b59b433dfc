use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::app_router;
use axum_prometheus::PrometheusMetricLayer;
use pop_atlas::config::AppConfig;
use pop_atlas::error::AppError;
use pop_atlas::service::SeriesService;
use pop_atlas::source::MockPopulationSource;
use pop_atlas::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let series = SeriesService::new(Arc::new(MockPopulationSource));
    let state = AppState::new(Arc::new(prometheus_handle), series);
    let readiness = state.readiness.clone();

    let app = app_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);

    info!(?config.environment, %addr, "population indicator service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
