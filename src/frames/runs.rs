// src/frames/runs.rs
use crate::api::types::Filters;
use crate::api::{PaginatedFetch, TestRailApi};
use crate::error::TestRailError;
use crate::model::{Record, Table};
use crate::types::{PlanId, ProjectId};
use serde_json::Value;

/// Test runs as tables.
pub struct Runs<'a> {
    api: &'a dyn TestRailApi,
    fetch: &'a PaginatedFetch,
}

impl<'a> Runs<'a> {
    pub(super) fn new(api: &'a dyn TestRailApi, fetch: &'a PaginatedFetch) -> Self {
        Self { api, fetch }
    }

    /// All runs of a project matching `filters` (e.g. `milestone_id`).
    pub fn to_dataframe(
        &self,
        project: ProjectId,
        filters: &Filters,
    ) -> Result<Table, TestRailError> {
        self.fetch.fetch_all(filters, |query| self.api.get_runs(project, query))
    }

    /// The runs of every entry of a test plan, flattened in entry order.
    pub fn dataframe_from_plan(&self, plan: PlanId) -> Result<Table, TestRailError> {
        let record = self.api.get_plan(plan)?;
        let Some(entries) = record.get("entries").and_then(Value::as_array) else {
            return Err(TestRailError::MissingField {
                entity: "plan",
                field: "entries",
            });
        };

        let runs: Vec<Record> = entries
            .iter()
            .filter_map(|entry| entry.get("runs").and_then(Value::as_array))
            .flatten()
            .filter_map(|run| serde_json::from_value::<Record>(run.clone()).ok())
            .collect();

        log::debug!("Plan {} has {} runs", plan, runs.len());
        Ok(Table::from_records(runs))
    }
}
