use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{debug, warn};

use crate::auth::IdentityService;
use crate::error::StatusError;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::status::models::StatusDocument;
use crate::status::service::DeviceStatusResolver;

pub struct HttpState {
    pub resolver: Arc<DeviceStatusResolver>,
    pub identity: Arc<IdentityService>,
    pub metrics: Arc<Metrics>,
}

pub fn router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/devices/:device_id/status", get(device_status))
        .route("/metrics", get(metrics))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

pub async fn device_status(
    State(state): State<Arc<HttpState>>,
    Path(device_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<StatusDocument>, StatusError> {
    let identity = state.identity.identify_http(&headers).inspect_err(|err| {
        state.metrics.unauthenticated_total.fetch_add(1, Ordering::Relaxed);
        warn!(error = %err, "status request rejected");
    })?;

    let device_id = device_id.trim();
    if device_id.is_empty() {
        return Err(StatusError::InvalidRequest("device id is required".into()));
    }

    debug!(subject = identity.subject, device_id, "status requested");
    let document = state.resolver.get_device_status(&identity, device_id).await?;
    Ok(Json(document))
}

async fn metrics(State(state): State<Arc<HttpState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
