use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::workflows::intake::domain::{ApplicationRecord, JobCategory, UnknownCategory};

/// Category dropdown on the staff dashboard: every category or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(JobCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: JobCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.key(),
        }
    }
}

impl From<JobCategory> for CategoryFilter {
    fn from(category: JobCategory) -> Self {
        CategoryFilter::Only(category)
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    /// `all` (any case) or a blank value selects every category.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        raw.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Current category selection and search box contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectoryQuery {
    pub category: CategoryFilter,
    pub search: String,
}

impl DirectoryQuery {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    pub fn matches(&self, record: &ApplicationRecord) -> bool {
        self.category.matches(record.job_category())
            && matches_search(record, &self.search.to_lowercase())
    }
}

fn matches_search(record: &ApplicationRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.full_name().to_lowercase().contains(needle)
        || record.email().to_lowercase().contains(needle)
}

/// Records visible under `query`, in their original order.
pub fn filter_applicants<'a>(
    records: &'a [ApplicationRecord],
    query: &DirectoryQuery,
) -> Vec<&'a ApplicationRecord> {
    records.iter().filter(|record| query.matches(record)).collect()
}
