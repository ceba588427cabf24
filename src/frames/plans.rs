// src/frames/plans.rs
use crate::api::types::Filters;
use crate::api::{PaginatedFetch, TestRailApi};
use crate::error::TestRailError;
use crate::model::Table;
use crate::types::ProjectId;

/// Test plans as tables.
pub struct Plans<'a> {
    api: &'a dyn TestRailApi,
    fetch: &'a PaginatedFetch,
}

impl<'a> Plans<'a> {
    pub(super) fn new(api: &'a dyn TestRailApi, fetch: &'a PaginatedFetch) -> Self {
        Self { api, fetch }
    }

    /// All plans of a project matching `filters`.
    pub fn to_dataframe(
        &self,
        project: ProjectId,
        filters: &Filters,
    ) -> Result<Table, TestRailError> {
        self.fetch.fetch_all(filters, |query| self.api.get_plans(project, query))
    }
}
