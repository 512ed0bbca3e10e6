//! Source tables and their knowledge-graph status

use crate::table::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How far a table has been added to the knowledge graph
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KgStatus {
    Mapped,
    PartiallyMapped,
    #[default]
    Pending,
    Error,
}

impl KgStatus {
    /// Badge text shown in the table list
    pub const fn label(self) -> &'static str {
        match self {
            KgStatus::Mapped => "Added to KG",
            KgStatus::PartiallyMapped => "Partially Added",
            KgStatus::Pending => "Not Added",
            KgStatus::Error => "Error",
        }
    }

    /// Mapped or partially mapped tables count as contextualised
    pub const fn is_contextualised(self) -> bool {
        matches!(self, KgStatus::Mapped | KgStatus::PartiallyMapped)
    }
}

/// A table discovered in a connected source system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub source: String,
    #[serde(default)]
    pub kg_status: KgStatus,
    /// Row count in the source system
    #[serde(default)]
    pub records: Option<u64>,
    /// Rows already converted into the knowledge graph
    #[serde(default)]
    pub kg_records: Option<u64>,
}

impl TableEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<String>,
        kg_status: KgStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alternate_names: Vec::new(),
            description: None,
            source: source.into(),
            kg_status,
            records: None,
            kg_records: None,
        }
    }

    pub fn with_records(mut self, records: u64, kg_records: u64) -> Self {
        self.records = Some(records);
        self.kg_records = Some(kg_records);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Status badge, including converted row counts for partial tables
    pub fn status_badge(&self) -> String {
        match self.kg_status {
            KgStatus::PartiallyMapped => format!(
                "{} ({} of {})",
                self.kg_status.label(),
                crate::formatting::format_thousands(self.kg_records.unwrap_or(0)),
                crate::formatting::format_thousands(self.records.unwrap_or(0)),
            ),
            status => status.label().to_string(),
        }
    }
}

impl Record for TableEntry {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "description" => self.description.as_deref().map(FieldValue::text),
            "source" => Some(FieldValue::text(&self.source)),
            "status" | "kg_status" => Some(FieldValue::status(&self.kg_status)),
            "records" => self.records.map(FieldValue::count),
            "kg_records" => self.kg_records.map(FieldValue::count),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<Cow<'_, str>> {
        let mut text = Vec::with_capacity(self.alternate_names.len() + 2);
        text.push(Cow::Borrowed(self.name.as_str()));
        text.extend(self.alternate_names.iter().map(|n| Cow::Borrowed(n.as_str())));
        if let Some(description) = &self.description {
            text.push(Cow::Borrowed(description.as_str()));
        }
        text
    }
}

/// Partial metadata update for one table, as produced by the metadata editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kg_status: Option<KgStatus>,
    #[serde(default)]
    pub source: Option<String>,
    /// Replaces the alternate names when set
    #[serde(default)]
    pub alternate_names: Option<Vec<String>>,
}

impl TableUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.kg_status.is_none()
            && self.source.is_none()
            && self.alternate_names.is_none()
    }

    pub(crate) fn apply_to(&self, table: &mut TableEntry) {
        if let Some(description) = &self.description {
            table.description = Some(description.clone());
        }
        if let Some(status) = self.kg_status {
            table.kg_status = status;
        }
        if let Some(source) = &self.source {
            table.source.clone_from(source);
        }
        if let Some(names) = &self.alternate_names {
            table.alternate_names.clone_from(names);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FilterState;

    #[test]
    fn test_search_covers_alternate_names_and_description() {
        let mut table = TableEntry::new("t1", "WORK_ORDERS", "SAP", KgStatus::Mapped)
            .with_description("Maintenance work orders");
        table.alternate_names = vec!["AUFK".to_string()];

        assert!(FilterState::new().with_search("aufk").matches(&table));
        assert!(FilterState::new().with_search("maintenance").matches(&table));
        assert!(!FilterState::new().with_search("maximo").matches(&table));
    }

    #[test]
    fn test_status_field_uses_wire_name() {
        let table = TableEntry::new("t1", "X", "SAP", KgStatus::PartiallyMapped);
        assert_eq!(
            table.field("status").map(|v| v.to_string()),
            Some("partially_mapped".to_string())
        );
    }

    #[test]
    fn test_partial_badge_shows_counts() {
        let table = TableEntry::new("t1", "X", "SAP", KgStatus::PartiallyMapped)
            .with_records(15000, 7500);
        assert_eq!(table.status_badge(), "Partially Added (7,500 of 15,000)");
        let pending = TableEntry::new("t2", "Y", "SAP", KgStatus::Pending);
        assert_eq!(pending.status_badge(), "Not Added");
    }

    #[test]
    fn test_update_only_touches_set_fields() {
        let mut table = TableEntry::new("t1", "X", "SAP", KgStatus::Pending).with_description("old");
        let update = TableUpdate {
            id: "t1".into(),
            kg_status: Some(KgStatus::Mapped),
            ..TableUpdate::default()
        };
        update.apply_to(&mut table);
        assert_eq!(table.kg_status, KgStatus::Mapped);
        assert_eq!(table.description.as_deref(), Some("old"));
        assert_eq!(table.source, "SAP");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"id":"t1","name":"WORK_ORDERS","source":"SAP","kgStatus":"partially_mapped","records":10,"kgRecords":4}"#;
        let table: TableEntry = serde_json::from_str(json).unwrap();
        assert_eq!(table.kg_status, KgStatus::PartiallyMapped);
        assert_eq!(table.kg_records, Some(4));
        assert!(table.alternate_names.is_empty());
    }
}
