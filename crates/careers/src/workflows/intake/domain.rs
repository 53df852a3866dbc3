use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Department an applicant applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum JobCategory {
    It,
    Maintenance,
    Accounting,
}

impl JobCategory {
    pub const ALL: [JobCategory; 3] = [
        JobCategory::It,
        JobCategory::Maintenance,
        JobCategory::Accounting,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            JobCategory::It => "it",
            JobCategory::Maintenance => "maintenance",
            JobCategory::Accounting => "accounting",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            JobCategory::It => "IT Services",
            JobCategory::Maintenance => "Maintenance Services",
            JobCategory::Accounting => "Accounting Services",
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        JobCategory::ALL
            .into_iter()
            .find(|category| category.key() == normalized)
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

impl TryFrom<String> for JobCategory {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job category '{0}' (expected it, maintenance, or accounting)")]
pub struct UnknownCategory(pub String);

/// Identifier wrapper for stored applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CV file as handed over by the upload control. Content type and size are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvUpload {
    pub file_name: String,
    #[serde(default)]
    pub content: Vec<u8>,
}

impl CvUpload {
    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

/// Opaque handle to a stored CV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvReference(pub String);

impl CvReference {
    pub fn for_upload(application_id: &ApplicationId, upload: &CvUpload) -> Self {
        let file_name = upload.file_name.trim();
        let file_name = if file_name.is_empty() {
            "cv"
        } else {
            file_name
        };
        Self(format!("cv/{}/{}", application_id.0, file_name))
    }
}

/// Raw form values as entered by the applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub category: Option<JobCategory>,
    pub cv: Option<CvUpload>,
}

/// An accepted application. Only built from values that passed intake validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationRecord {
    id: ApplicationId,
    full_name: String,
    email: String,
    phone: String,
    job_category: JobCategory,
    cv: CvReference,
    applied_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub(crate) fn new(
        id: ApplicationId,
        full_name: String,
        email: String,
        phone: String,
        job_category: JobCategory,
        cv: CvReference,
        applied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            full_name,
            email,
            phone,
            job_category,
            cv,
            applied_at,
        }
    }

    pub fn id(&self) -> &ApplicationId {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn job_category(&self) -> JobCategory {
        self.job_category
    }

    pub fn cv(&self) -> &CvReference {
        &self.cv
    }

    pub fn applied_at(&self) -> DateTime<Utc> {
        self.applied_at
    }

    /// Dashboard date format, e.g. `Apr 1, 2023`.
    pub fn applied_on_label(&self) -> String {
        self.applied_at.format("%b %-d, %Y").to_string()
    }

    pub fn view(&self) -> ApplicationView {
        ApplicationView {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            job_category: self.job_category,
            job_category_label: self.job_category.label(),
            cv: self.cv.clone(),
            applied_at: self.applied_at,
            applied_on: self.applied_on_label(),
        }
    }
}

/// Presentation payload for list rows and the detail view.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub job_category: JobCategory,
    pub job_category_label: &'static str,
    pub cv: CvReference,
    pub applied_at: DateTime<Utc>,
    pub applied_on: String,
}
