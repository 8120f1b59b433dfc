use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;

/// Public statistical data changes slowly; let shared caches hold it for an
/// hour and serve it stale for a day while revalidating.
const SERIES_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SeriesQuery {
    indicator_id: Option<String>,
    geo_code: Option<String>,
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/series", get(series_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn series_endpoint(
    Extension(state): Extension<AppState>,
    Query(params): Query<SeriesQuery>,
) -> Response {
    let (Some(indicator), Some(geo)) = (params.indicator_id, params.geo_code) else {
        let body = Json(json!({
            "error": "Invalid query. Expected ?indicatorId=...&geoCode=..."
        }));
        return (StatusCode::BAD_REQUEST, body).into_response();
    };

    match state.series.fetch(&indicator, &geo) {
        Ok(series) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, SERIES_CACHE_CONTROL)],
            Json(series),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
