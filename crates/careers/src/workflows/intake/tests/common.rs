use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::config::IntakeConfig;
use crate::workflows::intake::domain::{ApplicationForm, ApplicationRecord, CvUpload, JobCategory};
use crate::workflows::intake::repository::{ApplicationSink, SinkError};
use crate::workflows::intake::{intake_router, IntakeService};

pub(super) fn form() -> ApplicationForm {
    ApplicationForm {
        full_name: "Ahmed Mahmoud".to_string(),
        email: "ahmed.m@example.com".to_string(),
        phone: "+966 50 123 4567".to_string(),
        category: Some(JobCategory::It),
        cv: Some(cv()),
    }
}

pub(super) fn cv() -> CvUpload {
    CvUpload {
        file_name: "ahmed_cv.pdf".to_string(),
        content: b"%PDF-1.4".to_vec(),
    }
}

pub(super) fn empty_form() -> ApplicationForm {
    ApplicationForm {
        category: Some(JobCategory::Maintenance),
        ..ApplicationForm::default()
    }
}

pub(super) fn slow_config() -> IntakeConfig {
    IntakeConfig {
        submission_delay: Duration::from_millis(1500),
    }
}

pub(super) fn instant_config() -> IntakeConfig {
    IntakeConfig {
        submission_delay: Duration::ZERO,
    }
}

pub(super) fn build_service(
    config: IntakeConfig,
) -> (Arc<IntakeService<MemorySink>>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    let service = Arc::new(IntakeService::new(sink.clone(), config));
    (service, sink)
}

pub(super) fn router_with_service(service: Arc<IntakeService<MemorySink>>) -> axum::Router {
    intake_router(service)
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl MemorySink {
    pub(super) fn records(&self) -> Vec<ApplicationRecord> {
        self.records.lock().expect("sink mutex poisoned").clone()
    }
}

impl ApplicationSink for MemorySink {
    fn store(&self, record: ApplicationRecord) -> Result<ApplicationRecord, SinkError> {
        let mut guard = self.records.lock().expect("sink mutex poisoned");
        if guard.iter().any(|existing| existing.id() == record.id()) {
            return Err(SinkError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }
}

pub(super) struct ConflictSink;

impl ApplicationSink for ConflictSink {
    fn store(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, SinkError> {
        Err(SinkError::Conflict)
    }
}

/// Reports the first `taken` ids as already stored, then accepts.
pub(super) struct TakenIdsSink {
    taken: AtomicUsize,
    pub(super) inner: MemorySink,
}

impl TakenIdsSink {
    pub(super) fn new(taken: usize) -> Self {
        Self {
            taken: AtomicUsize::new(taken),
            inner: MemorySink::default(),
        }
    }
}

impl ApplicationSink for TakenIdsSink {
    fn store(&self, record: ApplicationRecord) -> Result<ApplicationRecord, SinkError> {
        let still_taken = self
            .taken
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if still_taken {
            return Err(SinkError::Conflict);
        }
        self.inner.store(record)
    }
}

pub(super) struct UnavailableSink;

impl ApplicationSink for UnavailableSink {
    fn store(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, SinkError> {
        Err(SinkError::Unavailable("storage offline".to_string()))
    }
}

pub(super) async fn wait_until_pending(service: &IntakeService<MemorySink>, email: &str) {
    while !service.is_pending(email) {
        tokio::task::yield_now().await;
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
