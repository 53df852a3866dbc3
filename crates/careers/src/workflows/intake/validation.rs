use chrono::{DateTime, Utc};

use super::domain::{
    ApplicationForm, ApplicationId, ApplicationRecord, CvReference, CvUpload, JobCategory,
};
use crate::workflows::forms::{
    check_email, is_blank, phone_shape_is_valid, FieldErrorKind, FieldErrorSet, FieldName,
};

/// Why an application form could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeRejection {
    #[error("application has {} invalid field(s)", .0.len())]
    Fields(FieldErrorSet),
    /// No category chosen. Any field errors found in the same pass ride along.
    #[error("a job category must be selected before submitting an application")]
    CategoryMissing { errors: Option<FieldErrorSet> },
}

impl IntakeRejection {
    pub fn field_errors(&self) -> Option<&FieldErrorSet> {
        match self {
            IntakeRejection::Fields(errors) => Some(errors),
            IntakeRejection::CategoryMissing { errors } => errors.as_ref(),
        }
    }
}

/// Form values that passed every intake rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedApplication {
    full_name: String,
    email: String,
    phone: String,
    category: JobCategory,
    cv: CvUpload,
}

impl ValidatedApplication {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn category(&self) -> JobCategory {
        self.category
    }

    pub fn cv(&self) -> &CvUpload {
        &self.cv
    }

    pub fn into_record(self, id: ApplicationId, applied_at: DateTime<Utc>) -> ApplicationRecord {
        let cv = CvReference::for_upload(&id, &self.cv);
        ApplicationRecord::new(
            id,
            self.full_name,
            self.email,
            self.phone,
            self.category,
            cv,
            applied_at,
        )
    }
}

/// Validate an application form, reporting every invalid field in one pass.
pub fn validate_application(form: ApplicationForm) -> Result<ValidatedApplication, IntakeRejection> {
    let ApplicationForm {
        full_name,
        email,
        phone,
        category,
        cv,
    } = form;

    let errors = check_contact_fields(&full_name, &email, &phone, cv.is_some());

    let Some(category) = category else {
        let errors = (!errors.is_empty()).then_some(errors);
        return Err(IntakeRejection::CategoryMissing { errors });
    };

    let cv = match cv {
        Some(cv) if errors.is_empty() => cv,
        _ => return Err(IntakeRejection::Fields(errors)),
    };

    Ok(ValidatedApplication {
        full_name: full_name.trim().to_string(),
        email: email.trim().to_string(),
        phone: phone.trim().to_string(),
        category,
        cv,
    })
}

/// Name, email, phone, and CV rules shared by form intake and directory imports.
pub(crate) fn check_contact_fields(
    full_name: &str,
    email: &str,
    phone: &str,
    has_cv: bool,
) -> FieldErrorSet {
    let mut errors = FieldErrorSet::new();

    if is_blank(full_name) {
        errors.insert(
            FieldName::FullName,
            FieldErrorKind::Required,
            "Full name is required",
        );
    }

    check_email(&mut errors, email);

    if is_blank(phone) {
        errors.insert(
            FieldName::Phone,
            FieldErrorKind::Required,
            "Phone number is required",
        );
    } else if !phone_shape_is_valid(phone) {
        errors.insert(
            FieldName::Phone,
            FieldErrorKind::InvalidFormat,
            "Phone number format is invalid",
        );
    }

    if !has_cv {
        errors.insert(FieldName::File, FieldErrorKind::Required, "CV file is required");
    }

    errors
}
