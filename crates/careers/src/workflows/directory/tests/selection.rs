use super::common::*;
use crate::workflows::directory::query::CategoryFilter;
use crate::workflows::directory::selection::{DirectorySelection, DirectoryView};
use crate::workflows::intake::domain::{ApplicationId, JobCategory};

#[test]
fn select_then_close_returns_to_none_selected() {
    let records = two_records();
    let mut selection = DirectorySelection::default();

    let shown = selection
        .select(&records, &ApplicationId("2".to_string()))
        .expect("record exists");
    assert_eq!(shown.full_name(), "Fatima Al-Sayed");
    assert!(selection.is_open());

    selection.close();
    assert!(!selection.is_open());
    assert_eq!(selection.selected_id(), None);
    assert!(selection.resolve(&records).is_none());
}

#[test]
fn at_most_one_record_is_selected() {
    let records = two_records();
    let mut selection = DirectorySelection::default();
    selection.select(&records, &ApplicationId("1".to_string()));
    selection.select(&records, &ApplicationId("2".to_string()));

    assert_eq!(selection.selected_id(), Some(&ApplicationId("2".to_string())));
    assert_eq!(
        selection.resolve(&records).map(|record| record.full_name()),
        Some("Fatima Al-Sayed")
    );
}

#[test]
fn unknown_id_leaves_nothing_selected() {
    let records = two_records();
    let mut selection = DirectorySelection::default();
    selection.select(&records, &ApplicationId("1".to_string()));

    assert!(selection
        .select(&records, &ApplicationId("99".to_string()))
        .is_none());
    assert!(!selection.is_open());
}

#[test]
fn view_combines_query_and_detail_selection() {
    let records = sample_records();
    let mut view = DirectoryView::new();
    assert_eq!(view.visible(&records).len(), 6);

    view.set_category(CategoryFilter::Only(JobCategory::Maintenance));
    assert_eq!(ids(&view.visible(&records)), vec!["3", "6"]);

    view.set_search("NOOR");
    assert_eq!(ids(&view.visible(&records)), vec!["6"]);

    let opened = view
        .open(&records, &ApplicationId("6".to_string()))
        .expect("record exists");
    assert_eq!(opened.email(), "noor.a@example.com");
    assert_eq!(
        view.selected(&records).map(|record| record.id().0.as_str()),
        Some("6")
    );

    view.set_search("");
    assert!(view.selection().is_open(), "query changes keep the selection");

    view.close();
    assert!(view.selected(&records).is_none());
    assert_eq!(view.query().category, CategoryFilter::Only(JobCategory::Maintenance));
}
