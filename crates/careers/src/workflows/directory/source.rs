use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::workflows::forms::FieldErrorSet;
use crate::workflows::intake::domain::{
    ApplicationId, ApplicationRecord, CvReference, JobCategory, UnknownCategory,
};
use crate::workflows::intake::validation::check_contact_fields;

const SAMPLE_APPLICANTS_CSV: &str = include_str!("../../../data/sample_applicants.csv");

/// Read interface the dashboard filters over; agnostic to where applicants come from.
pub trait ApplicantDirectory: Send + Sync {
    fn list_applicants(&self) -> Result<Vec<ApplicationRecord>, DirectoryError>;

    fn find_applicant(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, DirectoryError> {
        Ok(self
            .list_applicants()?
            .into_iter()
            .find(|record| record.id() == id))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("applicant directory unavailable: {0}")]
    Unavailable(String),
}

/// A fixed, already-loaded collection of applicants.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: Vec<ApplicationRecord>,
}

impl StaticDirectory {
    pub fn new(records: Vec<ApplicationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }
}

impl ApplicantDirectory for StaticDirectory {
    fn list_applicants(&self) -> Result<Vec<ApplicationRecord>, DirectoryError> {
        Ok(self.records.clone())
    }
}

#[derive(Debug)]
pub enum ApplicantImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownCategory {
        row: usize,
        source: UnknownCategory,
    },
    InvalidTimestamp {
        row: usize,
        value: String,
        source: chrono::ParseError,
    },
    InvalidApplicant {
        row: usize,
        errors: FieldErrorSet,
    },
    MissingColumnValue {
        row: usize,
        column: &'static str,
    },
    DuplicateId {
        row: usize,
        id: String,
    },
}

impl fmt::Display for ApplicantImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicantImportError::Io(err) => write!(f, "failed to read applicant export: {err}"),
            ApplicantImportError::Csv(err) => write!(f, "invalid applicant CSV data: {err}"),
            ApplicantImportError::UnknownCategory { row, source } => {
                write!(f, "row {row}: {source}")
            }
            ApplicantImportError::InvalidTimestamp { row, value, .. } => {
                write!(f, "row {row}: '{value}' is not an RFC 3339 timestamp")
            }
            ApplicantImportError::InvalidApplicant { row, errors } => {
                let fields: Vec<&str> = errors.fields().map(|field| field.key()).collect();
                write!(f, "row {row}: invalid applicant fields ({})", fields.join(", "))
            }
            ApplicantImportError::MissingColumnValue { row, column } => {
                write!(f, "row {row}: {column} must not be empty")
            }
            ApplicantImportError::DuplicateId { row, id } => {
                write!(f, "row {row}: duplicate applicant id '{id}'")
            }
        }
    }
}

impl std::error::Error for ApplicantImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApplicantImportError::Io(err) => Some(err),
            ApplicantImportError::Csv(err) => Some(err),
            ApplicantImportError::UnknownCategory { source, .. } => Some(source),
            ApplicantImportError::InvalidTimestamp { source, .. } => Some(source),
            ApplicantImportError::InvalidApplicant { .. }
            | ApplicantImportError::MissingColumnValue { .. }
            | ApplicantImportError::DuplicateId { .. } => None,
        }
    }
}

impl From<std::io::Error> for ApplicantImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ApplicantImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads applicant records from CSV exports with the columns
/// `id,name,email,phone,job_category,cv_url,applied_at`.
pub struct ApplicantImporter;

impl ApplicantImporter {
    /// The six applicants bundled with the portal for demos and local runs.
    pub fn sample() -> Result<Vec<ApplicationRecord>, ApplicantImportError> {
        Self::from_reader(SAMPLE_APPLICANTS_CSV.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicationRecord>, ApplicantImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>, ApplicantImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
            let row_number = index + 1;
            let record = row?.into_record(row_number)?;
            if !seen.insert(record.id().clone()) {
                return Err(ApplicantImportError::DuplicateId {
                    row: row_number,
                    id: record.id().0.clone(),
                });
            }
            records.push(record);
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    job_category: String,
    cv_url: String,
    applied_at: String,
}

impl ApplicantRow {
    fn into_record(self, row: usize) -> Result<ApplicationRecord, ApplicantImportError> {
        let job_category: JobCategory = self
            .job_category
            .parse()
            .map_err(|source| ApplicantImportError::UnknownCategory { row, source })?;

        let applied_at = DateTime::parse_from_rfc3339(&self.applied_at)
            .map_err(|source| ApplicantImportError::InvalidTimestamp {
                row,
                value: self.applied_at.clone(),
                source,
            })?
            .with_timezone(&Utc);

        for (column, value) in [("id", &self.id), ("cv_url", &self.cv_url)] {
            if value.is_empty() {
                return Err(ApplicantImportError::MissingColumnValue { row, column });
            }
        }

        let errors = check_contact_fields(&self.name, &self.email, &self.phone, true);
        if !errors.is_empty() {
            return Err(ApplicantImportError::InvalidApplicant { row, errors });
        }

        Ok(ApplicationRecord::new(
            ApplicationId(self.id),
            self.name,
            self.email,
            self.phone,
            job_category,
            CvReference(self.cv_url),
            applied_at,
        ))
    }
}
