// src/enrichment/mod.rs
//! Appends human-readable label columns next to identifier columns.
//!
//! Lookup tables are fetched fresh on every call and only for the columns a
//! table actually has. Resolution itself never fails: unknown values become
//! `UNKNOWN <raw>` so the enriched table keeps its shape.

pub mod custom_fields;
pub mod lookup;

use crate::api::types::Filters;
use crate::api::{PaginatedFetch, TestRailApi};
use crate::constants::{CUSTOM_FIELD_LABEL_SUFFIX, CUSTOM_FIELD_MARKER};
use crate::error::TestRailError;
use crate::model::Table;
use crate::types::{ProjectId, SuiteId};
use custom_fields::{CustomFieldConfig, Resolution};
use lookup::{LookupMap, LookupSource};
use serde_json::Value;

/// Project (and optional suite) that lookups are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichScope {
    pub project: ProjectId,
    pub suite: Option<SuiteId>,
}

impl EnrichScope {
    pub fn project(project: ProjectId) -> Self {
        Self {
            project,
            suite: None,
        }
    }

    pub fn with_suite(self, suite: Option<SuiteId>) -> Self {
        Self { suite, ..self }
    }
}

/// Resolves identifier and custom field columns against TestRail meta data.
pub struct LookupEnricher<'a> {
    api: &'a dyn TestRailApi,
    fetch: &'a PaginatedFetch,
    verbose: bool,
}

impl<'a> LookupEnricher<'a> {
    pub fn new(api: &'a dyn TestRailApi, fetch: &'a PaginatedFetch) -> Self {
        Self {
            api,
            fetch,
            verbose: false,
        }
    }

    /// Log every unresolved value as a warning.
    pub fn verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }

    /// Returns `table` with one label column per recognized identifier
    /// column and one `<field>_value` column per custom field column.
    ///
    /// Only fetching the lookup tables can fail.
    pub fn enrich(&self, mut table: Table, scope: &EnrichScope) -> Result<Table, TestRailError> {
        let columns: Vec<String> = table.columns().map(str::to_string).collect();

        for source in LookupSource::ALL {
            if !table.has_column(source.id_column()) {
                continue;
            }
            let map = self.load_lookup(source, scope)?;
            log::debug!(
                "Resolving {} against {} {:?} entries",
                source.id_column(),
                map.len(),
                source
            );

            let labels: Vec<Value> = table
                .column(source.id_column())
                .map(|raw| Value::String(self.resolve_standard(&map, source, raw)))
                .collect();
            table.insert_column(source.label_column(), labels);
        }

        let custom_columns: Vec<&String> = columns
            .iter()
            .filter(|name| name.contains(CUSTOM_FIELD_MARKER))
            .collect();
        if custom_columns.is_empty() {
            return Ok(table);
        }

        let config = CustomFieldConfig::from_case_fields(&self.api.get_case_fields()?);
        for name in custom_columns {
            let labels: Vec<Value> = table
                .column(name)
                .map(|raw| Value::String(self.resolve_custom(&config, name, scope.project, raw)))
                .collect();
            table.insert_column(format!("{}{}", name, CUSTOM_FIELD_LABEL_SUFFIX), labels);
        }

        Ok(table)
    }

    /// Fetches the meta records for one source in the given scope.
    pub fn load_lookup(
        &self,
        source: LookupSource,
        scope: &EnrichScope,
    ) -> Result<LookupMap, TestRailError> {
        let records = match source {
            LookupSource::Sections => {
                let mut filters = Filters::new();
                if let Some(suite) = scope.suite {
                    filters.insert("suite_id", suite.value());
                }
                let fetch_page = |query: &Filters| self.api.get_sections(scope.project, query);
                self.fetch.fetch_all(&filters, fetch_page)?.into_records()
            }
            LookupSource::Templates => self.api.get_templates(scope.project)?,
            LookupSource::CaseTypes => self.api.get_case_types()?,
            LookupSource::Priorities => self.api.get_priorities()?,
            LookupSource::Suites => self.api.get_suites(scope.project)?,
            LookupSource::Statuses => self.api.get_statuses()?,
        };
        Ok(LookupMap::from_records(&records, source.label_field()))
    }

    fn resolve_standard(&self, map: &LookupMap, source: LookupSource, raw: &Value) -> String {
        let label = map.resolve(raw);
        if self.verbose && map.lookup(raw).is_none() {
            log::warn!(
                "No {:?} entry for {} value {}",
                source,
                source.id_column(),
                raw
            );
        }
        label
    }

    fn resolve_custom(
        &self,
        config: &CustomFieldConfig,
        field: &str,
        project: ProjectId,
        raw: &Value,
    ) -> String {
        match config.resolve(field, project, raw) {
            Resolution::Resolved(label) => label,
            Resolution::Unknown(placeholder) => {
                if self.verbose {
                    log::warn!(
                        "Could not resolve {} value {} in project {}",
                        field,
                        raw,
                        project
                    );
                }
                placeholder
            }
        }
    }
}
