use super::domain::ApplicationRecord;

/// Downstream collaborator that receives accepted applications.
pub trait ApplicationSink: Send + Sync {
    fn store(&self, record: ApplicationRecord) -> Result<ApplicationRecord, SinkError>;
}

/// Error enumeration for sink failures.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("application already exists")]
    Conflict,
    #[error("application store unavailable: {0}")]
    Unavailable(String),
}
