use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::ApplicationForm;
use super::repository::{ApplicationSink, SinkError};
use super::service::{IntakeService, SubmissionError};
use super::validation::IntakeRejection;

/// Router builder exposing the public application endpoint.
pub fn intake_router<S>(service: Arc<IntakeService<S>>) -> Router
where
    S: ApplicationSink + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_route::<S>))
        .with_state(service)
}

/// Unreadable bodies (bad JSON, unknown category) answer with a JSON error at the rejection's status.
async fn submit_route<S>(
    state: State<Arc<IntakeService<S>>>,
    form: Result<axum::Json<ApplicationForm>, JsonRejection>,
) -> Response
where
    S: ApplicationSink + 'static,
{
    match form {
        Ok(form) => submit_handler(state, form).await,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            (rejection.status(), axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<IntakeService<S>>>,
    axum::Json(form): axum::Json<ApplicationForm>,
) -> Response
where
    S: ApplicationSink + 'static,
{
    let cancel = service.shutdown_token().child_token();
    match service.submit(form, cancel).await {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.view())).into_response(),
        Err(SubmissionError::Rejected(IntakeRejection::Fields(errors))) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Rejected(rejection @ IntakeRejection::CategoryMissing { .. })) => {
            let payload = json!({
                "error": rejection.to_string(),
                "errors": rejection.field_errors(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(
            err @ (SubmissionError::AlreadyPending | SubmissionError::Sink(SinkError::Conflict)),
        ) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(err @ SubmissionError::Cancelled) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
