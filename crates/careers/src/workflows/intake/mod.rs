//! Applicant-facing intake: form validation and the guarded, delayed submission.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationForm, ApplicationId, ApplicationRecord, ApplicationView, CvReference, CvUpload,
    JobCategory, UnknownCategory,
};
pub use repository::{ApplicationSink, SinkError};
pub use router::intake_router;
pub use service::{IntakeService, SubmissionError};
pub use validation::{validate_application, IntakeRejection, ValidatedApplication};
