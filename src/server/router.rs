use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post},
};

use super::setup::create_restaurant;
use super::tenant::tenant_router;
use crate::notify::Notifier;
use crate::service::Core;
use crate::store::KvStore;

pub struct AppState {
    pub core: Core,
    /// Same store the core runs on; also holds admin credentials.
    pub store: Arc<dyn KvStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            core: Core::new(store.clone(), notifier),
            store,
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/setup", post(create_restaurant))
        .nest("/api", tenant_router())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
