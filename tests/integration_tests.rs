//! Integration tests for kgdash
//!
//! These tests drive the public API end to end: a catalog file on disk is
//! loaded, listed through the engine, summarised into dashboard widgets,
//! edited and saved back.
//!
//! ```bash
//! cargo test --test integration_tests
//! ```

#![allow(clippy::uninlined_format_args)]

use kgdash::catalog::{KgStatus, ListKind, TableUpdate, load_catalog, save_catalog};
use kgdash::charts::Palette;
use kgdash::dashboard::{DashboardSummary, render_dashboard_svgs};
use kgdash::listing::list_catalog;
use kgdash::table::{DateRange, FieldFilter, FilterState, SortSpec, TableQuery};
use kgdash::validators::{Bound, parse_date_bound, parse_field_filter};
use std::num::NonZeroUsize;
use std::path::Path;

const CATALOG_JSON: &str = r#"{
  "tables": [
    {"id": "t1", "name": "WORK_ORDERS", "alternateNames": ["WO"], "description": "Maintenance work orders",
     "source": "SAP", "kgStatus": "mapped", "records": 15000, "kgRecords": 15000},
    {"id": "t2", "name": "ASSET_STATUS", "source": "SAP", "kgStatus": "partially_mapped",
     "records": 8000, "kgRecords": 2000},
    {"id": "t3", "name": "MAINTENANCE_LOG", "source": "Maximo", "kgStatus": "pending", "records": 2000},
    {"id": "t4", "name": "INVENTORY", "source": "Maximo", "kgStatus": "error"},
    {"id": "t5", "name": "sensor_readings", "source": "AVEVA PI", "kgStatus": "pending"}
  ],
  "forms": [
    {"id": "ef1", "name": "Process Deviation Report", "type": "embedded", "responses": 89,
     "kgStatus": "converted", "lastConverted": "2025-01-18T09:00:00Z"},
    {"id": "ef2", "name": "Hot Work Permit", "type": "permit", "responses": 12}
  ],
  "syncJobs": [
    {"id": "s1", "name": "Equipment Master Sync", "type": "scheduled",
     "sourceCollection": "plantDB.equipment", "schedule": "0 2 * * *", "status": "succeeded",
     "lastRun": "2025-01-19T02:00:00Z",
     "metrics": {"nodesUpserted": 1250, "edgesUpserted": 890, "deleted": 12, "errors": 0}},
    {"id": "s2", "name": "Work Order Listener", "type": "event-based",
     "sourceCollection": "plantDB.workOrders", "status": "running", "since": "2025-01-20T08:00:00Z",
     "eventsProcessed": 342,
     "metrics": {"nodesUpserted": 300, "edgesUpserted": 120, "deleted": 0, "errors": 0}},
    {"id": "s3", "name": "Ad-hoc Reload", "type": "manual", "sourceCollection": "plantDB.workOrders",
     "status": "failed", "lastRun": "2025-01-17T14:12:00Z"}
  ],
  "responses": [
    {"id": "r1", "formId": "ef1", "submittedBy": "John Smith", "submittedAt": "2025-01-15T14:30:00Z",
     "location": "Area A-101", "answers": {"title": "Pump P-001 check", "rating": 8}},
    {"id": "r2", "formId": "ef1", "submittedBy": "Sarah Johnson", "submittedAt": "2025-01-16T10:15:00Z",
     "location": "Area B-202", "answers": {"title": "Valve inspection", "rating": 6}},
    {"id": "r3", "formId": "ef1", "submittedBy": "Sarah Chen", "submittedAt": "2025-01-18T08:00:00Z",
     "location": "Area A-101", "answers": {"title": "Pump P-002 check", "rating": 9}}
  ]
}"#;

async fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("catalog.json");
    tokio::fs::write(&path, CATALOG_JSON)
        .await
        .expect("write catalog fixture");
    path
}

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[tokio::test]
async fn test_missing_catalog_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&dir.path().join("nope.json")).await.unwrap();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_invalid_catalog_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    tokio::fs::write(&path, "{\"tables\": [").await.unwrap();

    let err = kgdash::Error::from(load_catalog(&path).await.unwrap_err());
    assert!(err.translate().user_message.contains("not valid JSON"));
}

#[tokio::test]
async fn test_table_search_covers_alternate_names_and_description() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&write_catalog(dir.path()).await).await.unwrap();

    for term in ["wo", "maintenance work", "WORK_ORDERS"] {
        let view = TableQuery::new(size(10))
            .with_filters(FilterState::new().with_search(term))
            .with_sort(SortSpec::asc("name"))
            .apply(&catalog.tables);
        assert!(
            view.items.iter().any(|t| t.id == "t1"),
            "search {:?} should find WORK_ORDERS",
            term
        );
    }
}

#[tokio::test]
async fn test_tables_sorted_by_records_missing_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&write_catalog(dir.path()).await).await.unwrap();

    let view = TableQuery::new(size(10))
        .with_sort(SortSpec::desc("records"))
        .apply(&catalog.tables);
    let ids: Vec<_> = view.items.iter().map(|t| t.id.as_str()).collect();
    // t4 and t5 have no record count and keep their input order at the end
    assert_eq!(ids, ["t1", "t2", "t3", "t4", "t5"]);
}

#[tokio::test]
async fn test_locale_name_sort_ignores_case() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&write_catalog(dir.path()).await).await.unwrap();

    let view = TableQuery::new(size(10))
        .with_sort(SortSpec::asc("name"))
        .apply(&catalog.tables);
    let names: Vec<_> = view.items.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "ASSET_STATUS",
            "INVENTORY",
            "MAINTENANCE_LOG",
            "sensor_readings",
            "WORK_ORDERS"
        ]
    );
}

#[tokio::test]
async fn test_jobs_source_substring_and_last_activity() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&write_catalog(dir.path()).await).await.unwrap();

    let (field, filter) = parse_field_filter("source~workorders").unwrap();
    let view = TableQuery::new(size(15))
        .with_filters(FilterState::new().with_filter(field, filter))
        .with_sort(SortSpec::desc("last_run"))
        .apply(&catalog.sync_jobs);
    let ids: Vec<_> = view.items.iter().map(|j| j.id.as_str()).collect();
    // The event-based listener sorts by its start time
    assert_eq!(ids, ["s2", "s3"]);
}

#[tokio::test]
async fn test_responses_user_and_date_filters() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&write_catalog(dir.path()).await).await.unwrap();

    let range = DateRange::new(
        Some(parse_date_bound("2025-01-16", Bound::Start).unwrap()),
        Some(parse_date_bound("2025-01-18", Bound::End).unwrap()),
    );
    let filters = FilterState::new()
        .with_filter("user", FieldFilter::Contains("sarah".into()))
        .with_date_range(range);
    let view = TableQuery::new(size(50))
        .with_filters(filters)
        .with_sort(SortSpec::desc("submitted_at"))
        .apply(&catalog.responses);
    let ids: Vec<_> = view.items.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r3", "r2"]);

    // Numeric answers are searchable as text
    let view = TableQuery::new(size(50))
        .with_filters(FilterState::new().with_search("9"))
        .apply(&catalog.responses);
    assert_eq!(view.total_count, 1);
    assert_eq!(view.items[0].id, "r3");
}

#[tokio::test]
async fn test_pagination_over_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&write_catalog(dir.path()).await).await.unwrap();

    let query = TableQuery::new(size(2)).with_sort(SortSpec::asc("id"));
    let pages: Vec<Vec<&str>> = (1..=3)
        .map(|page| {
            query
                .clone()
                .with_page(page)
                .apply(&catalog.tables)
                .items
                .iter()
                .map(|t| t.id.as_str())
                .collect()
        })
        .collect();
    assert_eq!(pages, [vec!["t1", "t2"], vec!["t3", "t4"], vec!["t5"]]);

    let beyond = query.clone().with_page(4).apply(&catalog.tables);
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_pages, 3);

    let text = list_catalog(&catalog, ListKind::Tables, &query.with_page(3), false).unwrap();
    assert!(text.contains("Showing 5 to 5 of 5"));
    assert!(text.ends_with("< 1 2 [3]  "));
}

#[tokio::test]
async fn test_dashboard_widgets_written_for_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&write_catalog(dir.path()).await).await.unwrap();

    let summary = DashboardSummary::from_catalog(&catalog);
    assert_eq!(summary.total_tables, 5);
    assert_eq!(summary.contextualised_tables, 2);
    assert_eq!(summary.coverage, 40.0);
    assert_eq!(summary.failed_jobs, 1);
    // Oldest activity first: s3 (no metrics), s1, s2
    assert_eq!(summary.sync_activity, vec![0.0, 1250.0, 300.0]);

    let widgets = render_dashboard_svgs(&summary, &Palette::default(), 120.0);
    let names: Vec<_> = widgets.iter().map(|w| w.file_name.as_str()).collect();
    assert!(names.contains(&"source_aveva_pi.svg"));
    assert!(names.contains(&"sync_activity.svg"));
    for widget in &widgets {
        assert!(widget.svg.starts_with("<svg"), "{} is not SVG", widget.file_name);
        assert!(widget.svg.ends_with("</svg>"));
    }
}

#[tokio::test]
async fn test_annotate_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_catalog(dir.path()).await;
    let mut catalog = load_catalog(&path).await.unwrap();

    let update = TableUpdate {
        id: "t3".into(),
        description: Some("CMMS maintenance history".into()),
        kg_status: Some(KgStatus::Mapped),
        alternate_names: Some(vec!["MAINT_LOG".into()]),
        ..TableUpdate::default()
    };
    catalog.update_table(&update).unwrap();
    save_catalog(&path, &catalog).await.unwrap();

    let reloaded = load_catalog(&path).await.unwrap();
    assert_eq!(reloaded, catalog);
    let table = reloaded.find_table("t3").unwrap();
    assert_eq!(table.kg_status, KgStatus::Mapped);
    assert_eq!(table.alternate_names, ["MAINT_LOG"]);

    let view = TableQuery::new(size(10))
        .with_filters(FilterState::new().with_search("maint_log"))
        .apply(&reloaded.tables);
    assert_eq!(view.total_count, 1);

    // Only catalog.json remains; the temp file was renamed over it
    let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
    let mut count = 0;
    while entries.next_entry().await.unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 1);
}
