use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::query::{filter_applicants, DirectoryQuery};
use super::source::ApplicantDirectory;
use super::stats::{recent_applications, DashboardStats};
use crate::workflows::intake::domain::{ApplicationId, ApplicationView};

const DEFAULT_RECENT_LIMIT: usize = 5;

/// Router builder exposing the staff dashboard read endpoints.
pub fn directory_router<D>(directory: Arc<D>) -> Router
where
    D: ApplicantDirectory + 'static,
{
    Router::new()
        .route("/api/v1/applicants", get(list_handler::<D>))
        .route("/api/v1/applicants/:applicant_id", get(detail_handler::<D>))
        .route("/api/v1/dashboard/stats", get(stats_handler::<D>))
        .with_state(directory)
}

pub(crate) async fn list_handler<D>(
    State(directory): State<Arc<D>>,
    Query(query): Query<DirectoryQuery>,
) -> Response
where
    D: ApplicantDirectory + 'static,
{
    let records = match directory.list_applicants() {
        Ok(records) => records,
        Err(err) => return unavailable(err),
    };

    let applicants: Vec<ApplicationView> = filter_applicants(&records, &query)
        .into_iter()
        .map(|record| record.view())
        .collect();
    let payload = json!({
        "category": query.category.key(),
        "search": query.search,
        "total": applicants.len(),
        "applicants": applicants,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn detail_handler<D>(
    State(directory): State<Arc<D>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    D: ApplicantDirectory + 'static,
{
    let id = ApplicationId(applicant_id);
    match directory.find_applicant(&id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("no application with id '{id}'"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => unavailable(err),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatsQuery {
    #[serde(default)]
    pub(crate) recent: Option<usize>,
}

pub(crate) async fn stats_handler<D>(
    State(directory): State<Arc<D>>,
    Query(query): Query<StatsQuery>,
) -> Response
where
    D: ApplicantDirectory + 'static,
{
    let records = match directory.list_applicants() {
        Ok(records) => records,
        Err(err) => return unavailable(err),
    };

    let stats = DashboardStats::from_records(&records);
    let recent: Vec<ApplicationView> =
        recent_applications(&records, query.recent.unwrap_or(DEFAULT_RECENT_LIMIT))
            .into_iter()
            .map(|record| record.view())
            .collect();
    let payload = json!({
        "total_applicants": stats.total_applicants,
        "by_category": stats.by_category,
        "recent": recent,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn unavailable(err: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
