use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::directory::source::{ApplicantDirectory, DirectoryError, StaticDirectory};
use crate::workflows::directory::ApplicantImporter;
use crate::workflows::intake::domain::{
    ApplicationId, ApplicationRecord, CvReference, JobCategory,
};

pub(super) fn record(
    id: &str,
    name: &str,
    email: &str,
    category: JobCategory,
    day: u32,
) -> ApplicationRecord {
    ApplicationRecord::new(
        ApplicationId(id.to_string()),
        name.to_string(),
        email.to_string(),
        "+966 50 123 4567".to_string(),
        category,
        CvReference("#".to_string()),
        Utc.with_ymd_and_hms(2023, 3, day, 9, 0, 0).unwrap(),
    )
}

/// R1 (IT, Ahmed) and R2 (Accounting, Fatima).
pub(super) fn two_records() -> Vec<ApplicationRecord> {
    vec![
        record(
            "1",
            "Ahmed Mahmoud",
            "ahmed.m@example.com",
            JobCategory::It,
            1,
        ),
        record(
            "2",
            "Fatima Al-Sayed",
            "fatima.a@example.com",
            JobCategory::Accounting,
            2,
        ),
    ]
}

pub(super) fn sample_records() -> Vec<ApplicationRecord> {
    ApplicantImporter::sample().expect("bundled sample parses")
}

pub(super) fn sample_directory() -> Arc<StaticDirectory> {
    Arc::new(StaticDirectory::new(sample_records()))
}

pub(super) fn ids(records: &[&ApplicationRecord]) -> Vec<String> {
    records.iter().map(|record| record.id().0.clone()).collect()
}

pub(super) struct OfflineDirectory;

impl ApplicantDirectory for OfflineDirectory {
    fn list_applicants(&self) -> Result<Vec<ApplicationRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("replica offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
