//! Staff-facing applicant directory: category filter, search, detail selection, and stats.

pub mod query;
pub mod router;
pub mod selection;
pub mod source;
pub mod stats;

#[cfg(test)]
mod tests;

pub use query::{filter_applicants, CategoryFilter, DirectoryQuery};
pub use router::directory_router;
pub use selection::{DirectorySelection, DirectoryView};
pub use source::{
    ApplicantDirectory, ApplicantImportError, ApplicantImporter, DirectoryError, StaticDirectory,
};
pub use stats::{recent_applications, CategoryCounts, DashboardStats};
