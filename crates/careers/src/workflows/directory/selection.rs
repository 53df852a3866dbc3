use crate::workflows::intake::domain::{ApplicationId, ApplicationRecord};

use super::query::{filter_applicants, CategoryFilter, DirectoryQuery};

/// Which record, if any, the detail view is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySelection {
    selected: Option<ApplicationId>,
}

impl DirectorySelection {
    /// Opens the detail view for `id`. An unknown id leaves nothing selected.
    pub fn select<'a>(
        &mut self,
        records: &'a [ApplicationRecord],
        id: &ApplicationId,
    ) -> Option<&'a ApplicationRecord> {
        let found = records.iter().find(|record| record.id() == id);
        self.selected = found.map(|record| record.id().clone());
        found
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&ApplicationId> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn resolve<'a>(&self, records: &'a [ApplicationRecord]) -> Option<&'a ApplicationRecord> {
        let id = self.selected.as_ref()?;
        records.iter().find(|record| record.id() == id)
    }
}

/// Per-page state of the applications table: the query plus the detail selection.
#[derive(Debug, Clone, Default)]
pub struct DirectoryView {
    query: DirectoryQuery,
    selection: DirectorySelection,
}

impl DirectoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &DirectoryQuery {
        &self.query
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn visible<'a>(&self, records: &'a [ApplicationRecord]) -> Vec<&'a ApplicationRecord> {
        filter_applicants(records, &self.query)
    }

    pub fn open<'a>(
        &mut self,
        records: &'a [ApplicationRecord],
        id: &ApplicationId,
    ) -> Option<&'a ApplicationRecord> {
        self.selection.select(records, id)
    }

    pub fn close(&mut self) {
        self.selection.close();
    }

    pub fn selection(&self) -> &DirectorySelection {
        &self.selection
    }

    pub fn selected<'a>(&self, records: &'a [ApplicationRecord]) -> Option<&'a ApplicationRecord> {
        self.selection.resolve(records)
    }
}
