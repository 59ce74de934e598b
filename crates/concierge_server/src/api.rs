//! Liveness routes and request logging.

use axum::{
    Router,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use parking_lot::Mutex;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

const HEALTH_PATH: &str = "/health";

/// Rate limiter for health-check access logs.
///
/// Health checks arrive every few seconds from the hosting platform; only one
/// per window is logged.
#[derive(Debug)]
pub struct HealthLog {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl HealthLog {
    /// Log at most once per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Whether a health check at `now` should be logged. Records `now` if so.
    pub fn should_log(&self, now: Instant) -> bool {
        let mut last = self.last.lock();
        let due = last.is_none_or(|at| now.saturating_duration_since(at) >= self.interval);
        if due {
            *last = Some(now);
        }
        due
    }
}

/// State shared by the liveness handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    health_log: Arc<HealthLog>,
}

impl ApiState {
    /// Creates new API state logging health checks at most once per `interval`.
    pub fn new(health_log_interval: Duration) -> Self {
        Self {
            health_log: Arc::new(HealthLog::new(health_log_interval)),
        }
    }

    /// The health-check log limiter.
    pub fn health_log(&self) -> &HealthLog {
        &self.health_log
    }
}

/// Creates the liveness router.
///
/// `GET /health` always answers; `GET /` answers the same when `root_route`
/// is set. Every request except health checks is logged with its peer
/// address.
pub fn create_router(state: ApiState, root_route: bool) -> Router {
    let mut router = Router::new().route(HEALTH_PATH, get(health_check));
    if root_route {
        router = router.route("/", get(health_check));
    }
    router
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    if state.health_log.should_log(Instant::now()) {
        info!("Health check received");
    }
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Whether a request to `path` gets an access log line.
///
/// Health checks are excluded; they have their own rate-limited line.
pub fn logs_request(path: &str) -> bool {
    path != HEALTH_PATH
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;

    if logs_request(&path) {
        info!("{} - {} {}", peer, method, path);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_log_rate_limited() {
        let log = HealthLog::new(Duration::from_secs(300));
        let start = Instant::now();

        assert!(log.should_log(start));
        assert!(!log.should_log(start + Duration::from_secs(10)));
        assert!(!log.should_log(start + Duration::from_secs(299)));
        assert!(log.should_log(start + Duration::from_secs(300)));
        assert!(!log.should_log(start + Duration::from_secs(301)));
    }
}
