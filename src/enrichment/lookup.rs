// src/enrichment/lookup.rs
//! Identifier to label maps built from TestRail meta endpoints.

use crate::constants::UNKNOWN_LABEL_PREFIX;
use crate::model::Record;
use serde_json::Value;
use std::collections::HashMap;

/// The identifier columns that enrichment knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Sections,
    Templates,
    CaseTypes,
    Priorities,
    Suites,
    Statuses,
}

impl LookupSource {
    pub const ALL: [LookupSource; 6] = [
        LookupSource::Sections,
        LookupSource::Templates,
        LookupSource::CaseTypes,
        LookupSource::Priorities,
        LookupSource::Suites,
        LookupSource::Statuses,
    ];

    /// Column holding the raw identifiers.
    pub fn id_column(&self) -> &'static str {
        match self {
            LookupSource::Sections => "section_id",
            LookupSource::Templates => "template_id",
            LookupSource::CaseTypes => "type_id",
            LookupSource::Priorities => "priority_id",
            LookupSource::Suites => "suite_id",
            LookupSource::Statuses => "status_id",
        }
    }

    /// Column appended with the resolved labels.
    pub fn label_column(&self) -> &'static str {
        match self {
            LookupSource::Sections => "section_name",
            LookupSource::Templates => "template_name",
            LookupSource::CaseTypes => "type_name",
            LookupSource::Priorities => "priority_name",
            LookupSource::Suites => "suite_name",
            LookupSource::Statuses => "status_name",
        }
    }

    /// Field of the meta record that carries the display label.
    pub fn label_field(&self) -> &'static str {
        match self {
            LookupSource::Statuses => "label",
            _ => "name",
        }
    }
}

/// Integer identifier to display label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupMap {
    labels: HashMap<i64, String>,
}

impl LookupMap {
    /// Builds a map from meta records, keyed by `id`. Records without an
    /// integer `id` or a string label are skipped.
    pub fn from_records<'a, I>(records: I, label_field: &str) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let labels = records
            .into_iter()
            .filter_map(|record| {
                let id = record.get("id").and_then(as_identifier)?;
                let label = record.get(label_field).and_then(Value::as_str)?;
                Some((id, label.to_string()))
            })
            .collect();
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// Label for a raw cell, or `None` when the cell does not resolve.
    pub fn lookup(&self, raw: &Value) -> Option<&str> {
        as_identifier(raw).and_then(|id| self.get(id))
    }

    /// Label for a raw cell, falling back to `UNKNOWN <raw>`.
    pub fn resolve(&self, raw: &Value) -> String {
        match self.lookup(raw) {
            Some(label) => label.to_string(),
            None => unknown_label(raw),
        }
    }
}

/// Reads an integer identifier from a number or numeric string cell.
pub(crate) fn as_identifier(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Placeholder for a value that could not be resolved.
pub fn unknown_label(raw: &Value) -> String {
    format!("{} {}", UNKNOWN_LABEL_PREFIX, raw_display(raw))
}

/// Strings print without quotes; everything else prints as JSON.
pub(crate) fn raw_display(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
