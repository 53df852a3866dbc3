use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::domain::{ApplicationForm, ApplicationId, ApplicationRecord};
use super::repository::{ApplicationSink, SinkError};
use super::validation::{validate_application, IntakeRejection};
use crate::config::IntakeConfig;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Ids drawn before a sink conflict is reported. Seeded directories may already hold some.
const MAX_ID_ATTEMPTS: usize = 16;

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

type PendingSet = Arc<Mutex<HashSet<String>>>;

/// Service composing validation, the simulated submission delay, and the downstream sink.
///
/// While a submission for an applicant email is waiting out its delay, further attempts for the
/// same email are rejected with [`SubmissionError::AlreadyPending`].
pub struct IntakeService<S> {
    sink: Arc<S>,
    config: IntakeConfig,
    pending: PendingSet,
    shutdown: CancellationToken,
}

impl<S> IntakeService<S>
where
    S: ApplicationSink + 'static,
{
    pub fn new(sink: Arc<S>, config: IntakeConfig) -> Self {
        Self {
            sink,
            config,
            pending: Arc::default(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> IntakeConfig {
        self.config
    }

    /// Parent token for per-request cancellation. Cancelling it aborts every pending submission.
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    pub fn is_pending(&self, email: &str) -> bool {
        let key = pending_key(email);
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
    }

    /// Validate and submit an application, resolving once the submission delay has elapsed and
    /// the record has been handed to the sink.
    pub async fn submit(
        &self,
        form: ApplicationForm,
        cancel: CancellationToken,
    ) -> Result<ApplicationRecord, SubmissionError> {
        let validated = validate_application(form).inspect_err(|rejection| {
            debug!(%rejection, "application rejected by intake validation");
        })?;

        let _pending = PendingSubmission::claim(&self.pending, validated.email())?;
        let category = validated.category();
        debug!(
            category = category.key(),
            delay_ms = self.config.submission_delay.as_millis() as u64,
            "application submission pending"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(category = category.key(), "application submission cancelled");
                return Err(SubmissionError::Cancelled);
            }
            _ = tokio::time::sleep(self.config.submission_delay) => {}
        }

        let applied_at = Utc::now();
        let mut attempt = 1;
        let stored = loop {
            let record = validated.clone().into_record(next_application_id(), applied_at);
            match self.sink.store(record) {
                Err(SinkError::Conflict) if attempt < MAX_ID_ATTEMPTS => {
                    debug!(attempt, "application id already taken, drawing the next one");
                    attempt += 1;
                }
                result => break result?,
            }
        };
        info!(
            application_id = %stored.id(),
            category = category.key(),
            "application submitted"
        );
        Ok(stored)
    }
}

fn pending_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Marks an applicant as mid-submission until dropped.
struct PendingSubmission {
    key: String,
    pending: PendingSet,
}

impl PendingSubmission {
    fn claim(pending: &PendingSet, email: &str) -> Result<Self, SubmissionError> {
        let key = pending_key(email);
        let mut guard = pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !guard.insert(key.clone()) {
            return Err(SubmissionError::AlreadyPending);
        }

        Ok(Self {
            key,
            pending: Arc::clone(pending),
        })
    }
}

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Rejected(#[from] IntakeRejection),
    #[error("a submission for this applicant is already pending")]
    AlreadyPending,
    #[error("submission was cancelled before it completed")]
    Cancelled,
    #[error(transparent)]
    Sink(#[from] SinkError),
}
