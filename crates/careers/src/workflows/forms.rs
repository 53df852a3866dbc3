//! Field-level validation results shared by the intake and account forms.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{8,20}$").expect("phone pattern compiles"));

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    FullName,
    Name,
    Email,
    Phone,
    File,
    Password,
    ConfirmPassword,
}

impl FieldName {
    /// Key used by the presentation layer to place the message next to its input.
    pub const fn key(self) -> &'static str {
        match self {
            FieldName::FullName => "fullName",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::File => "file",
            FieldName::Name => "name",
            FieldName::Password => "password",
            FieldName::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field was empty (after trimming, for text inputs).
    Required,
    /// The field had content that failed its pattern check.
    InvalidFormat,
    /// Two password entries differ.
    PasswordMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

/// Mapping from field to the message shown beside it. Iterates in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrorSet {
    errors: BTreeMap<FieldName, FieldError>,
}

impl FieldErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`, keeping the first one reported.
    pub fn insert(&mut self, field: FieldName, kind: FieldErrorKind, message: &'static str) {
        self.errors
            .entry(field)
            .or_insert(FieldError { kind, message });
    }

    pub fn get(&self, field: FieldName) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn kind_of(&self, field: FieldName) -> Option<FieldErrorKind> {
        self.get(field).map(|error| error.kind)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    /// `Ok(value)` when nothing was reported, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Serialize for FieldErrorSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, error) in &self.errors {
            map.serialize_entry(field.key(), error.message)?;
        }
        map.end()
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn email_shape_is_valid(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub(crate) fn phone_shape_is_valid(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Required check followed by the `<x>@<y>.<z>` shape check.
pub(crate) fn check_email(errors: &mut FieldErrorSet, email: &str) {
    if is_blank(email) {
        errors.insert(
            FieldName::Email,
            FieldErrorKind::Required,
            "Email is required",
        );
    } else if !email_shape_is_valid(email) {
        errors.insert(
            FieldName::Email,
            FieldErrorKind::InvalidFormat,
            "Email format is invalid",
        );
    }
}
