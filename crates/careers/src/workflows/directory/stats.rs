use serde::Serialize;

use crate::workflows::intake::domain::{ApplicationRecord, JobCategory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub it: usize,
    pub maintenance: usize,
    pub accounting: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: JobCategory) -> usize {
        match category {
            JobCategory::It => self.it,
            JobCategory::Maintenance => self.maintenance,
            JobCategory::Accounting => self.accounting,
        }
    }

    fn slot(&mut self, category: JobCategory) -> &mut usize {
        match category {
            JobCategory::It => &mut self.it,
            JobCategory::Maintenance => &mut self.maintenance,
            JobCategory::Accounting => &mut self.accounting,
        }
    }
}

/// Headline numbers for the dashboard overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_applicants: usize,
    pub by_category: CategoryCounts,
}

impl DashboardStats {
    pub fn from_records(records: &[ApplicationRecord]) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total_applicants += 1;
            *stats.by_category.slot(record.job_category()) += 1;
        }
        stats
    }
}

/// Newest applications first; ties keep their collection order.
pub fn recent_applications(records: &[ApplicationRecord], limit: usize) -> Vec<&ApplicationRecord> {
    let mut ordered: Vec<&ApplicationRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.applied_at().cmp(&a.applied_at()));
    ordered.truncate(limit);
    ordered
}
