//! Jobs that synchronise source collections into the knowledge graph

use crate::table::{FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// What triggers a sync job
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum JobType {
    Manual,
    Scheduled,
    EventBased,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    Running,
    Succeeded,
    Failed,
    #[default]
    Pending,
    Stopped,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncScope {
    Full,
    #[default]
    Incremental,
}

/// Counters reported by the last run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetrics {
    pub nodes_upserted: u64,
    pub edges_upserted: u64,
    pub deleted: u64,
    pub errors: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncJob {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub source_collection: String,
    /// Cron expression for scheduled jobs
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub next_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub scope: SyncScope,
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Event-based jobs: events handled since `since`
    #[serde(default)]
    pub events_processed: Option<u64>,
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub metrics: Option<SyncMetrics>,
}

impl SyncJob {
    /// Last activity: the last run, or the start of an event-based listener
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.last_run.or(self.since)
    }
}

impl Record for SyncJob {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "type" | "job_type" => Some(FieldValue::status(&self.job_type)),
            "source" | "source_collection" => Some(FieldValue::text(&self.source_collection)),
            "status" => Some(FieldValue::status(&self.status)),
            "scope" => Some(FieldValue::status(&self.scope)),
            "schedule" => self.schedule.as_deref().map(FieldValue::text),
            "enabled" => self.enabled.map(FieldValue::Bool),
            "last_run" => self.last_activity().map(FieldValue::Timestamp),
            "next_run" => self.next_run.map(FieldValue::Timestamp),
            "events_processed" => self.events_processed.map(FieldValue::count),
            "nodes_upserted" => self.metrics.map(|m| FieldValue::count(m.nodes_upserted)),
            "errors" => self.metrics.map(|m| FieldValue::count(m.errors)),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.source_collection.as_str()),
        ]
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_activity()
    }
}
