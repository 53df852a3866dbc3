use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use school_careers::workflows::accounts::accounts_router;
use school_careers::workflows::directory::{directory_router, ApplicantDirectory};
use school_careers::workflows::intake::{intake_router, ApplicationSink, IntakeService};
use serde_json::json;
use std::sync::Arc;

/// Public intake, staff dashboard, and account form routes plus the operational endpoints.
pub(crate) fn with_portal_routes<S, D>(
    intake: Arc<IntakeService<S>>,
    directory: Arc<D>,
) -> axum::Router
where
    S: ApplicationSink + 'static,
    D: ApplicantDirectory + 'static,
{
    intake_router(intake)
        .merge(directory_router(directory))
        .merge(accounts_router())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
