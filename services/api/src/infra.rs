use metrics_exporter_prometheus::PrometheusHandle;
use pop_atlas::service::SeriesService;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
    pub series: Arc<SeriesService>,
}

impl AppState {
    pub fn new(metrics: Arc<PrometheusHandle>, series: SeriesService) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics,
            series: Arc::new(series),
        }
    }
}
