// src/enrichment/custom_fields.rs
//! Custom field option labels, per field and per project.
//!
//! Dropdown and multi-select custom fields store option keys in case and
//! test records. Their labels live in the `configs` of `get_case_fields`,
//! one config block per project scope, with options encoded as lines of
//! `"<key>, <label>"`.

use super::lookup::{raw_display, unknown_label};
use crate::model::Record;
use crate::types::ProjectId;
use serde_json::Value;
use std::collections::HashMap;

/// Key of one custom field option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// Sentinel for a missing or empty value; always maps to `""`.
    Empty,
    Int(i64),
    Text(String),
}

impl OptionKey {
    /// Integer if the token parses as one, the raw token otherwise.
    /// A blank token is `Int(0)`.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() {
            return OptionKey::Int(0);
        }
        match token.parse::<i64>() {
            Ok(n) => OptionKey::Int(n),
            Err(_) => OptionKey::Text(token.to_string()),
        }
    }

    fn is_zero(&self) -> bool {
        matches!(self, OptionKey::Int(0))
    }
}

/// Splits one options line on its first comma into key and label.
pub fn parse_option_line(line: &str) -> (OptionKey, String) {
    match line.split_once(',') {
        Some((key, label)) => (OptionKey::parse(key), label.trim().to_string()),
        None => (OptionKey::parse(line), String::new()),
    }
}

/// Option key to label for one field in one project.
pub type OptionMap = HashMap<OptionKey, String>;

/// Parses an `items` blob into an option map, sentinel included.
pub fn parse_options(items: &str) -> OptionMap {
    let mut options: OptionMap = items.lines().map(parse_option_line).collect();
    options.insert(OptionKey::Empty, String::new());
    options
}

/// A raw custom field value, decoded once before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomValue {
    /// Nothing selected.
    Empty,
    Single(OptionKey),
    /// A multi-select, with zero keys already dropped.
    Many(Vec<OptionKey>),
}

impl CustomValue {
    pub fn decode(raw: &Value) -> Self {
        match raw {
            Value::Null | Value::Bool(false) => CustomValue::Empty,
            Value::Bool(true) => CustomValue::Single(OptionKey::Text("true".to_string())),
            Value::Number(_) => match number_key(raw) {
                Some(key) if !key.is_zero() => CustomValue::Single(key),
                _ => CustomValue::Empty,
            },
            Value::String(s) => match OptionKey::parse(s) {
                key if key.is_zero() => CustomValue::Empty,
                key => CustomValue::Single(key),
            },
            Value::Array(items) if items.is_empty() => CustomValue::Empty,
            Value::Array(items) => CustomValue::Many(
                items
                    .iter()
                    .map(element_key)
                    .filter(|key| !key.is_zero() && *key != OptionKey::Empty)
                    .collect(),
            ),
            Value::Object(_) => CustomValue::Single(OptionKey::Text(raw.to_string())),
        }
    }
}

/// Integer key of a number; floats are truncated, non-finite ones are empty.
fn number_key(raw: &Value) -> Option<OptionKey> {
    let Value::Number(n) = raw else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(OptionKey::Int(i));
    }
    n.as_f64()
        .filter(|f| f.is_finite())
        .map(|f| OptionKey::Int(f.trunc() as i64))
}

fn element_key(item: &Value) -> OptionKey {
    match item {
        Value::Number(_) => number_key(item).unwrap_or(OptionKey::Empty),
        Value::String(s) => OptionKey::parse(s),
        Value::Null => OptionKey::Empty,
        other => OptionKey::Text(raw_display(other)),
    }
}

/// Option maps of one field, per project, plus an optional global block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldScopes {
    projects: HashMap<u64, OptionMap>,
    global: Option<OptionMap>,
}

impl FieldScopes {
    /// The project's own block, else the global block.
    pub fn for_project(&self, project: ProjectId) -> Option<&OptionMap> {
        let scoped = self.projects.get(&project.value());
        scoped.or(self.global.as_ref())
    }
}

/// Field system name to per-project option labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomFieldConfig {
    fields: HashMap<String, FieldScopes>,
}

impl CustomFieldConfig {
    /// Builds the config from `get_case_fields` records.
    ///
    /// Records without a `system_name`, and config blocks without a usable
    /// context, are skipped with a debug log.
    pub fn from_case_fields<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut fields: HashMap<String, FieldScopes> = HashMap::new();

        for record in records {
            let Some(name) = record.get("system_name").and_then(Value::as_str) else {
                log::debug!("Skipping case field without system_name");
                continue;
            };
            let scopes = fields.entry(name.to_string()).or_default();

            for config in config_blocks(record) {
                let options = config
                    .get("options")
                    .and_then(|o| o.get("items"))
                    .and_then(Value::as_str)
                    .map(parse_options)
                    .unwrap_or_else(|| parse_options(""));

                let context = config.get("context");
                let is_global = context
                    .and_then(|c| c.get("is_global"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let project_ids = context
                    .and_then(|c| c.get("project_ids"))
                    .and_then(Value::as_array);

                match project_ids {
                    Some(ids) if !is_global => {
                        for id in ids.iter().filter_map(Value::as_u64) {
                            scopes.projects.insert(id, options.clone());
                        }
                    }
                    _ if is_global || context.is_some() => {
                        scopes.global = Some(options);
                    }
                    _ => log::debug!("Skipping config of {} without context", name),
                }
            }
        }

        Self { fields }
    }

    /// Registers the options blob of `field` for one project.
    pub fn insert_project_options(&mut self, field: &str, project: ProjectId, items: &str) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .projects
            .insert(project.value(), parse_options(items));
    }

    pub fn field(&self, name: &str) -> Option<&FieldScopes> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Label for a raw value of `field` in `project`.
    ///
    /// Empty values, unknown fields and projects outside the field's scope
    /// give `""`. A miss on any key gives `UNKNOWN <raw>` for the whole cell.
    pub fn resolve(&self, field: &str, project: ProjectId, raw: &Value) -> Resolution {
        let decoded = CustomValue::decode(raw);
        if decoded == CustomValue::Empty {
            return Resolution::Resolved(String::new());
        }

        let Some(options) = self.field(field).and_then(|f| f.for_project(project)) else {
            return Resolution::Resolved(String::new());
        };

        let labels = match &decoded {
            CustomValue::Empty => Some(String::new()),
            CustomValue::Single(key) => options.get(key).cloned(),
            CustomValue::Many(keys) => keys
                .iter()
                .map(|key| options.get(key).map(String::as_str))
                .collect::<Option<Vec<_>>>()
                .map(|labels| labels.join(",")),
        };

        match labels {
            Some(label) => Resolution::Resolved(label),
            None => Resolution::Unknown(unknown_label(raw)),
        }
    }
}

/// Outcome of resolving one custom field cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    /// Holds the `UNKNOWN <raw>` placeholder.
    Unknown(String),
}

/// `configs` is normally an array; some instances return it JSON-encoded.
fn config_blocks(record: &Record) -> Vec<Value> {
    match record.get("configs") {
        Some(Value::Array(blocks)) => blocks.clone(),
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(blocks)) => blocks,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
