//! Field forms and their submitted responses

use crate::table::{FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Form template family
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FormType {
    Embedded,
    Round,
    Permit,
    Jha,
    Inspection,
    Generic,
}

/// Knowledge-graph conversion state of a form
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
pub enum FormStatus {
    #[default]
    NotConverted,
    Partially,
    Converted,
    Error,
}

impl FormStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FormStatus::NotConverted => "Not Converted",
            FormStatus::Partially => "Partially Converted",
            FormStatus::Converted => "Converted",
            FormStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plant: String,
    #[serde(rename = "type")]
    pub form_type: FormType,
    /// Number of submitted responses
    #[serde(default)]
    pub responses: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kg_status: FormStatus,
    #[serde(default)]
    pub last_converted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_by: Option<String>,
}

impl Record for FormEntry {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "plant" => Some(FieldValue::text(&self.plant)),
            "type" | "form_type" => Some(FieldValue::status(&self.form_type)),
            "responses" => Some(FieldValue::count(self.responses)),
            "status" | "kg_status" => Some(FieldValue::status(&self.kg_status)),
            "last_converted" => self.last_converted.map(FieldValue::Timestamp),
            "last_published" => self.last_published.map(FieldValue::Timestamp),
            "published_by" => self.published_by.as_deref().map(FieldValue::text),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.description.as_str()),
        ]
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_published
    }
}

/// One submission of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    #[serde(default)]
    pub form_id: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    /// Answers keyed by question id; values keep their JSON type
    #[serde(default)]
    pub answers: BTreeMap<String, serde_json::Value>,
}

/// Renders an answer the way it is displayed and searched: strings without
/// quotes, everything else as JSON text.
pub fn answer_text(value: &serde_json::Value) -> Cow<'_, str> {
    match value {
        serde_json::Value::String(s) => Cow::Borrowed(s.as_str()),
        serde_json::Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

impl Record for FormResponse {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "form_id" => Some(FieldValue::text(&self.form_id)),
            "submitted_by" | "user" => Some(FieldValue::text(&self.submitted_by)),
            "submitted_at" => Some(FieldValue::Timestamp(self.submitted_at)),
            "location" => Some(FieldValue::text(&self.location)),
            question => self.answers.get(question).map(|value| match value {
                serde_json::Value::Number(n) => FieldValue::Number(n.as_f64().unwrap_or(f64::NAN)),
                serde_json::Value::Bool(b) => FieldValue::Bool(*b),
                other => FieldValue::Text(answer_text(other)),
            }),
        }
    }

    fn search_text(&self) -> Vec<Cow<'_, str>> {
        let mut text: Vec<_> = self.answers.values().map(answer_text).collect();
        text.push(Cow::Borrowed(self.submitted_by.as_str()));
        text
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.submitted_at)
    }
}
