use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    cache::{CacheError, CacheStore},
    config::Config,
    forecast::{normalize, visualcrossing::{VisualCrossingClient, VisualCrossingError}},
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<dyn CacheStore>,
    pub weather_client: Arc<VisualCrossingClient>,
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Location is required")]
    BadRequest,
    #[error("upstream request failed: {0}")]
    Upstream(#[from] VisualCrossingError),
    #[error("cache failure: {0}")]
    Cache(#[from] CacheError),
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest => (StatusCode::BAD_REQUEST, "Location is required"),
            Self::Upstream(_) | Self::Cache(_) | Self::Serialization(_) => {
                tracing::error!("Weather request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data")
            }
        };

        let body = ErrorResponse {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

// Route handlers
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, GatewayError> {
    let location = params
        .get("location")
        .filter(|location| !location.is_empty())
        .ok_or(GatewayError::BadRequest)?;

    if let Some(cached) = state.cache.get(location).await? {
        tracing::debug!(location = %location, "Cache hit");
        return Ok(json_body(cached));
    }

    tracing::debug!(location = %location, "Cache miss, calling Visual Crossing");
    let raw = state.weather_client.get_timeline(location).await?;
    let record = normalize(&raw);
    tracing::debug!(
        location = %location,
        days = record.daily().len(),
        hours = record.hourly().len(),
        "Normalized timeline"
    );
    let body = record.to_json()?;

    state
        .cache
        .set(location, body.clone(), state.config.cache_ttl_secs)
        .await?;

    Ok(json_body(body))
}

/// CORS policy admitting browser requests from a single origin.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|_| anyhow::anyhow!("CORS_ORIGIN is not a valid header value: {}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET]))
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_weather))
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::config::test_config;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    /// Memory store that records every write.
    #[derive(Default)]
    struct CountingCacheStore {
        inner: MemoryCacheStore,
        sets: AtomicUsize,
    }

    #[async_trait]
    impl CacheStore for CountingCacheStore {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value, ttl_secs).await
        }
    }

    struct UnavailableCacheStore;

    #[async_trait]
    impl CacheStore for UnavailableCacheStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into())
        }

        async fn set(&self, _key: &str, _value: String, _ttl_secs: u64) -> Result<(), CacheError> {
            Err(redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into())
        }
    }

    fn create_test_app(mock_server: &MockServer, cache: Arc<dyn CacheStore>) -> Router {
        let config = test_config(&mock_server.uri());
        let weather_client = Arc::new(VisualCrossingClient::new(config.clone()).unwrap());
        create_router(AppState {
            config: Arc::new(config),
            cache,
            weather_client,
        })
    }

    async fn send(app: &Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn mount_timeline(mock_server: &MockServer, body: Value) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(mock_server)
            .await;
    }

    fn example_timeline() -> Value {
        json!({
            "currentConditions": {"temp": 25},
            "days": [{"datetime": "2025-01-01", "tempmax": 30, "tempmin": 20, "conditions": "Clear"}]
        })
    }

    #[tokio::test]
    async fn test_missing_location_is_bad_request() {
        let mock_server = MockServer::start().await;
        let app = create_test_app(&mock_server, Arc::new(MemoryCacheStore::default()));

        for uri in ["/", "/?city=Recife", "/?location=", "/?foo=bar&unitGroup=us"] {
            let (status, body) = send(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
            assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"error": "Location is required"}));
        }

        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_example_location_is_normalized() {
        let mock_server = MockServer::start().await;
        mount_timeline(&mock_server, example_timeline()).await;
        let app = create_test_app(&mock_server, Arc::new(MemoryCacheStore::default()));

        let (status, body) = send(&app, "/?location=S%C3%A3o%20Paulo").await;
        assert_eq!(status, StatusCode::OK);

        let record: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(record["temperature"], json!(25));
        assert_eq!(record["high"], json!(30));
        assert_eq!(record["low"], json!(20));
        assert_eq!(record["humidity"], json!(0));
        assert_eq!(record["precipType"], Value::Null);
        assert_eq!(record["daily"][0]["day"], json!("2025-01-01"));
        assert_eq!(record["daily"][0]["condition"], json!("Clear"));

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.path().ends_with("/timeline/S%C3%A3o%20Paulo"));
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(example_timeline()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let cache = Arc::new(CountingCacheStore::default());
        let app = create_test_app(&mock_server, cache.clone());

        let (first_status, first_body) = send(&app, "/?location=Fortaleza").await;
        assert_eq!(first_status, StatusCode::OK);
        assert_eq!(cache.sets.load(Ordering::SeqCst), 1);

        let (second_status, second_body) = send(&app, "/?location=Fortaleza").await;
        assert_eq!(second_status, StatusCode::OK);
        assert_eq!(second_body, first_body);
        assert_eq!(cache.sets.load(Ordering::SeqCst), 1);
        assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cached_value_is_returned_verbatim() {
        let mock_server = MockServer::start().await;
        let cache = Arc::new(MemoryCacheStore::default());
        cache
            .set("Manaus", "{\"temperature\":31,\"custom\":true}".to_string(), 3600)
            .await
            .unwrap();
        let app = create_test_app(&mock_server, cache);

        let (status, body) = send(&app, "/?location=Manaus").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{\"temperature\":31,\"custom\":true}");
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let cache = Arc::new(CountingCacheStore::default());
        let app = create_test_app(&mock_server, cache.clone());

        let (status, body) = send(&app, "/?location=Curitiba").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"error": "Failed to fetch data"}));
        assert_eq!(cache.sets.load(Ordering::SeqCst), 0);
        assert!(cache.get("Curitiba").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unparseable_upstream_body_is_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Bad API Request"))
            .mount(&mock_server)
            .await;
        let app = create_test_app(&mock_server, Arc::new(MemoryCacheStore::default()));

        let (status, body) = send(&app, "/?location=Goi%C3%A2nia").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"error": "Failed to fetch data"}));
    }

    #[tokio::test]
    async fn test_cache_failure_is_server_error() {
        let mock_server = MockServer::start().await;
        mount_timeline(&mock_server, example_timeline()).await;
        let app = create_test_app(&mock_server, Arc::new(UnavailableCacheStore));

        let (status, body) = send(&app, "/?location=Salvador").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"error": "Failed to fetch data"}));
    }

    #[tokio::test]
    async fn test_distinct_locations_have_distinct_entries() {
        let mock_server = MockServer::start().await;
        mount_timeline(&mock_server, example_timeline()).await;
        let cache = Arc::new(CountingCacheStore::default());
        let app = create_test_app(&mock_server, cache.clone());

        send(&app, "/?location=Recife").await;
        send(&app, "/?location=recife").await;

        assert_eq!(cache.sets.load(Ordering::SeqCst), 2);
        assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let mock_server = MockServer::start().await;
        let app = create_test_app(&mock_server, Arc::new(MemoryCacheStore::default()));

        let (status, body) = send(&app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let health: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(health["status"], json!("healthy"));
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin_only() {
        let mock_server = MockServer::start().await;
        let cache = Arc::new(MemoryCacheStore::default());
        cache.set("Recife", "{}".to_string(), 3600).await.unwrap();
        let app = create_test_app(&mock_server, cache)
            .layer(cors_layer("http://localhost:5173").unwrap());

        let allowed = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/?location=Recife")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );

        let denied = app
            .oneshot(
                Request::builder()
                    .uri("/?location=Recife")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        assert!(cors_layer("http://bad\norigin").is_err());
    }
}
