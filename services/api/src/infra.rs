use metrics_exporter_prometheus::PrometheusHandle;
use school_careers::workflows::directory::{
    ApplicantDirectory, ApplicantImportError, ApplicantImporter, CategoryFilter, DirectoryError,
};
use school_careers::workflows::intake::{ApplicationRecord, ApplicationSink, SinkError};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Applicants held in memory and shared by intake (writes) and the dashboard (reads).
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationStore {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl InMemoryApplicationStore {
    pub(crate) fn seeded(records: Vec<ApplicationRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl ApplicationSink for InMemoryApplicationStore {
    fn store(&self, record: ApplicationRecord) -> Result<ApplicationRecord, SinkError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| SinkError::Unavailable("application store lock poisoned".to_string()))?;
        if guard.iter().any(|existing| existing.id() == record.id()) {
            return Err(SinkError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }
}

impl ApplicantDirectory for InMemoryApplicationStore {
    fn list_applicants(&self) -> Result<Vec<ApplicationRecord>, DirectoryError> {
        let guard = self.records.lock().map_err(|_| {
            DirectoryError::Unavailable("application store lock poisoned".to_string())
        })?;
        Ok(guard.clone())
    }
}

/// Bundled sample applicants unless an export path is given.
pub(crate) fn load_applicants(
    applicants_csv: Option<&Path>,
) -> Result<Vec<ApplicationRecord>, ApplicantImportError> {
    match applicants_csv {
        Some(path) => ApplicantImporter::from_path(path),
        None => ApplicantImporter::sample(),
    }
}

pub(crate) fn parse_category(raw: &str) -> Result<CategoryFilter, String> {
    raw.trim().parse::<CategoryFilter>().map_err(|err| err.to_string())
}
