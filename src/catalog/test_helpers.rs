//! Shared catalog fixtures for unit tests
//!
//! This module is only compiled in test mode.

use super::{
    Catalog, FormEntry, FormResponse, FormStatus, FormType, JobStatus, JobType, KgStatus, SyncJob,
    SyncMetrics, SyncScope, TableEntry,
};
use chrono::{DateTime, Utc};
use serde_json::json;

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn sample_form(id: &str, name: &str, status: FormStatus, responses: u64) -> FormEntry {
    FormEntry {
        id: id.to_string(),
        name: name.to_string(),
        plant: "1000-Hamburg".to_string(),
        form_type: FormType::Embedded,
        responses,
        description: format!("{name} form"),
        kg_status: status,
        last_converted: None,
        last_published: Some(ts("2025-01-10T09:00:00Z")),
        published_by: Some("Sarah Chen".to_string()),
    }
}

pub fn sample_response(id: &str, submitted_by: &str, submitted_at: &str) -> FormResponse {
    let answers = [
        ("title_verification", json!("Daily Equipment Check - Pump P-001")),
        ("form_type", json!("General")),
        ("mandatory_check", json!(true)),
        ("form_rating", json!(8)),
        ("form_category", json!("Maintenance")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    FormResponse {
        id: id.to_string(),
        form_id: "ef1".to_string(),
        submitted_by: submitted_by.to_string(),
        submitted_at: ts(submitted_at),
        location: "Area A-101".to_string(),
        answers,
    }
}

pub fn sample_job(id: &str, name: &str, status: JobStatus, last_run: &str) -> SyncJob {
    SyncJob {
        id: id.to_string(),
        name: name.to_string(),
        job_type: JobType::Manual,
        source_collection: "plantDB.workOrders".to_string(),
        schedule: None,
        next_run: None,
        last_run: Some(ts(last_run)),
        status,
        scope: SyncScope::Full,
        enabled: None,
        events_processed: None,
        since: None,
        logs: vec![format!("[{last_run}] Starting manual sync")],
        metrics: Some(SyncMetrics {
            nodes_upserted: 1250,
            edges_upserted: 890,
            deleted: 12,
            errors: 0,
        }),
    }
}

/// Small catalog: four tables over two sources, two forms, two jobs, one response
pub fn sample_catalog() -> Catalog {
    Catalog {
        tables: vec![
            TableEntry::new("t1", "WORK_ORDERS", "SAP", KgStatus::Mapped).with_records(15000, 15000),
            TableEntry::new("t2", "ASSET_STATUS", "SAP", KgStatus::PartiallyMapped)
                .with_records(8000, 2000),
            TableEntry::new("t3", "MAINTENANCE_LOG", "Maximo", KgStatus::Pending)
                .with_records(2000, 0),
            TableEntry::new("t4", "INVENTORY", "Maximo", KgStatus::Error),
        ],
        forms: vec![
            sample_form("ef1", "Process Deviation Report", FormStatus::Converted, 89),
            sample_form("ef2", "Hot Work Permit", FormStatus::NotConverted, 12),
        ],
        sync_jobs: vec![
            sample_job("m2", "Equipment Master Sync", JobStatus::Succeeded, "2025-01-19T10:30:00Z"),
            sample_job("m1", "Ad-hoc Reload", JobStatus::Failed, "2025-01-20T14:12:00Z"),
        ],
        responses: vec![sample_response("r1", "John Smith", "2025-01-15T14:30:00Z")],
    }
}
