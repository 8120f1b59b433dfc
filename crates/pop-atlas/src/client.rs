//! Client-side fetch layer for the series endpoint.
//!
//! Wraps a [`SeriesTransport`] with a per-(indicator, geo) cache: results are
//! served directly within a short freshness window, stale entries are served
//! immediately while a refresh runs off the request path, concurrent
//! identical requests are coalesced into one upstream call, and a failed
//! fetch is retried once. Transport errors are truncated to a bounded length
//! before they reach any UI.

use crate::catalog::{GeoCode, IndicatorId};
use crate::series::IndicatorSeries;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tracing::debug;

/// Upper bound on surfaced error text; keeps large or sensitive payloads out
/// of the UI.
pub const MAX_ERROR_LEN: usize = 200;

const DEFAULT_FRESH_FOR: Duration = Duration::from_secs(60);

pub fn truncate_message(raw: &str) -> String {
    if raw.len() <= MAX_ERROR_LEN {
        return raw.to_string();
    }
    let mut end = MAX_ERROR_LEN;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    raw[..end].to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    pub message: String,
}

impl ClientError {
    fn new(raw: impl AsRef<str>) -> Self {
        Self { message: truncate_message(raw.as_ref()) }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed payload: {0}")]
    Decode(String),
}

impl From<TransportError> for ClientError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Status { status, body } => {
                if body.trim().is_empty() {
                    Self::new(format!("Request failed with status {status}"))
                } else {
                    Self::new(body)
                }
            }
            other => Self::new(other.to_string()),
        }
    }
}

#[async_trait]
pub trait SeriesTransport: Send + Sync {
    async fn fetch_series(
        &self,
        indicator: IndicatorId,
        geo: GeoCode,
    ) -> Result<IndicatorSeries, TransportError>;
}

/// Transport hitting a running instance of the series endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: reqwest::Client::new() }
    }
}

#[async_trait]
impl SeriesTransport for HttpTransport {
    async fn fetch_series(
        &self,
        indicator: IndicatorId,
        geo: GeoCode,
    ) -> Result<IndicatorSeries, TransportError> {
        let url = format!(
            "{}/api/series?indicatorId={indicator}&geoCode={geo}",
            self.base_url.trim_end_matches('/'),
        );
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status: status.as_u16(), body });
        }

        response
            .json::<IndicatorSeries>()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}

type CacheKey = (IndicatorId, GeoCode);
type SharedResult = Result<IndicatorSeries, ClientError>;

struct CacheEntry {
    series: IndicatorSeries,
    fetched_at: Instant,
}

pub struct SeriesClient<T> {
    transport: Arc<T>,
    fresh_for: Duration,
    cache: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
    inflight: Arc<Mutex<HashMap<CacheKey, broadcast::Sender<SharedResult>>>>,
}

impl<T> Clone for SeriesClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            fresh_for: self.fresh_for,
            cache: Arc::clone(&self.cache),
            inflight: Arc::clone(&self.inflight),
        }
    }
}

impl<T: SeriesTransport + 'static> SeriesClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_freshness(transport, DEFAULT_FRESH_FOR)
    }

    pub fn with_freshness(transport: T, fresh_for: Duration) -> Self {
        Self {
            transport: Arc::new(transport),
            fresh_for,
            cache: Arc::new(Mutex::new(HashMap::new())),
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get(
        &self,
        indicator: IndicatorId,
        geo: GeoCode,
    ) -> Result<IndicatorSeries, ClientError> {
        let key = (indicator, geo);
        if let Some((series, stale)) = self.cached(key) {
            if stale {
                // Serve the stale value and refresh off the request path.
                let client = self.clone();
                tokio::spawn(async move {
                    if let Err(err) = client.coalesced_fetch(key).await {
                        debug!(%indicator, %geo, error = %err, "background refresh failed");
                    }
                });
            }
            return Ok(series);
        }
        self.coalesced_fetch(key).await
    }

    fn cached(&self, key: CacheKey) -> Option<(IndicatorSeries, bool)> {
        let cache = self.cache.lock().expect("cache mutex poisoned");
        cache
            .get(&key)
            .map(|entry| (entry.series.clone(), entry.fetched_at.elapsed() >= self.fresh_for))
    }

    /// One upstream call per key at a time; followers wait for the leader's
    /// result instead of issuing their own request.
    async fn coalesced_fetch(&self, key: CacheKey) -> SharedResult {
        let receiver = {
            let mut inflight = self.inflight.lock().expect("inflight mutex poisoned");
            match inflight.get(&key) {
                Some(sender) => Some(sender.subscribe()),
                None => {
                    let (sender, _) = broadcast::channel(1);
                    inflight.insert(key, sender);
                    None
                }
            }
        };

        if let Some(mut receiver) = receiver {
            return match receiver.recv().await {
                Ok(result) => result,
                // Leader dropped without broadcasting; fetch directly.
                Err(_) => self.fetch_and_store(key).await,
            };
        }

        let result = self.fetch_and_store(key).await;
        let sender = {
            let mut inflight = self.inflight.lock().expect("inflight mutex poisoned");
            inflight.remove(&key)
        };
        if let Some(sender) = sender {
            let _ = sender.send(result.clone());
        }
        result
    }

    async fn fetch_and_store(&self, key: CacheKey) -> SharedResult {
        let result = self.fetch_with_retry(key).await;
        if let Ok(series) = &result {
            let mut cache = self.cache.lock().expect("cache mutex poisoned");
            cache.insert(key, CacheEntry { series: series.clone(), fetched_at: Instant::now() });
        }
        result
    }

    async fn fetch_with_retry(&self, (indicator, geo): CacheKey) -> SharedResult {
        match self.transport.fetch_series(indicator, geo).await {
            Ok(series) => Ok(series),
            Err(first) => {
                debug!(%indicator, %geo, error = %first, "series fetch failed; retrying once");
                self.transport
                    .fetch_series(indicator, geo)
                    .await
                    .map_err(ClientError::from)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesPoint;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_series() -> IndicatorSeries {
        IndicatorSeries {
            indicator_id: IndicatorId::PopulationTotal,
            geo_code: GeoCode::Aus,
            unit: "people".to_string(),
            points: vec![SeriesPoint { period: "2022".to_string(), value: 889_200.0 }],
            source_name: "stub".to_string(),
            source_url: None,
            retrieved_at: Utc::now(),
            last_updated: None,
        }
    }

    /// Succeeds after `fail_first` initial failures; optional per-call delay.
    struct StubTransport {
        calls: AtomicUsize,
        fail_first: usize,
        delay: Option<Duration>,
    }

    impl StubTransport {
        fn ok() -> Self {
            Self { calls: AtomicUsize::new(0), fail_first: 0, delay: None }
        }

        fn failing_first(fail_first: usize) -> Self {
            Self { calls: AtomicUsize::new(0), fail_first, delay: None }
        }

        fn slow(delay: Duration) -> Self {
            Self { calls: AtomicUsize::new(0), fail_first: 0, delay: Some(delay) }
        }
    }

    #[async_trait]
    impl SeriesTransport for Arc<StubTransport> {
        async fn fetch_series(
            &self,
            _indicator: IndicatorId,
            _geo: GeoCode,
        ) -> Result<IndicatorSeries, TransportError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if call < self.fail_first {
                Err(TransportError::Status { status: 502, body: "upstream sad".to_string() })
            } else {
                Ok(sample_series())
            }
        }
    }

    #[tokio::test]
    async fn serves_fresh_cache_hits_without_refetching() {
        let stub = Arc::new(StubTransport::ok());
        let client = SeriesClient::with_freshness(Arc::clone(&stub), Duration::from_secs(60));

        let first = client.get(IndicatorId::PopulationTotal, GeoCode::Aus).await.unwrap();
        let second = client.get(IndicatorId::PopulationTotal, GeoCode::Aus).await.unwrap();

        assert_eq!(first.points, second.points);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_once_after_a_transport_failure() {
        let stub = Arc::new(StubTransport::failing_first(1));
        let client = SeriesClient::new(Arc::clone(&stub));

        let series = client.get(IndicatorId::PopulationTotal, GeoCode::Aus).await.unwrap();

        assert_eq!(series.unit, "people");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_the_single_retry() {
        let stub = Arc::new(StubTransport::failing_first(usize::MAX));
        let client = SeriesClient::new(Arc::clone(&stub));

        let err = client.get(IndicatorId::PopulationTotal, GeoCode::Aus).await.unwrap_err();

        assert_eq!(err.message, "upstream sad");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_identical_requests_share_one_upstream_call() {
        let stub = Arc::new(StubTransport::slow(Duration::from_millis(20)));
        let client = SeriesClient::new(Arc::clone(&stub));

        let (a, b) = tokio::join!(
            client.get(IndicatorId::PopulationTotal, GeoCode::Aus),
            client.get(IndicatorId::PopulationTotal, GeoCode::Aus),
        );

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_entries_are_served_then_refreshed_in_the_background() {
        let stub = Arc::new(StubTransport::ok());
        let client = SeriesClient::with_freshness(Arc::clone(&stub), Duration::ZERO);

        client.get(IndicatorId::PopulationTotal, GeoCode::Aus).await.unwrap();
        // Entry is immediately stale; the next read serves it and refreshes.
        client.get(IndicatorId::PopulationTotal, GeoCode::Aus).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn error_messages_are_bounded() {
        let long_body = "x".repeat(5 * MAX_ERROR_LEN);
        let err = ClientError::from(TransportError::Status { status: 500, body: long_body });
        assert_eq!(err.message.len(), MAX_ERROR_LEN);

        let empty = ClientError::from(TransportError::Status { status: 503, body: "  ".to_string() });
        assert_eq!(empty.message, "Request failed with status 503");
    }
}
