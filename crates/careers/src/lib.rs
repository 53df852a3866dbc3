//! Application intake and applicant directory for the school careers portal.
//!
//! The intake workflow validates applicant forms and turns them into application records after
//! a guarded, cancellable submission. The directory workflow filters, searches, and summarises
//! those records for the staff dashboard.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
