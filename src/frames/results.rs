// src/frames/results.rs
use super::record_id;
use crate::api::types::Filters;
use crate::api::{PaginatedFetch, TestRailApi};
use crate::error::TestRailError;
use crate::model::Table;
use crate::types::{CaseId, MilestoneId, ProjectId, RunId, TestId};

/// Test results as tables.
pub struct Results<'a> {
    api: &'a dyn TestRailApi,
    fetch: &'a PaginatedFetch,
}

impl<'a> Results<'a> {
    pub(super) fn new(api: &'a dyn TestRailApi, fetch: &'a PaginatedFetch) -> Self {
        Self { api, fetch }
    }

    /// Results of one case within one run.
    pub fn dataframe_from_case(
        &self,
        run: RunId,
        case: CaseId,
        filters: &Filters,
    ) -> Result<Table, TestRailError> {
        let api = self.api;
        self.fetch.fetch_all(filters, |query| api.get_results_for_case(run, case, query))
    }

    /// Results of one test.
    pub fn dataframe_from_test(
        &self,
        test: TestId,
        filters: &Filters,
    ) -> Result<Table, TestRailError> {
        self.fetch.fetch_all(filters, |query| self.api.get_results(test, query))
    }

    /// Results of every test in a run.
    pub fn dataframe_from_run(
        &self,
        run: RunId,
        filters: &Filters,
    ) -> Result<Table, TestRailError> {
        log::debug!("Fetching results for run {}", run);
        self.fetch.fetch_all(filters, |query| self.api.get_results_for_run(run, query))
    }

    /// Results of every run attached to a milestone, run by run.
    ///
    /// `filters` apply to the results, not to the run lookup.
    pub fn dataframe_from_milestone(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
        filters: &Filters,
    ) -> Result<Table, TestRailError> {
        let run_filters = Filters::new().with("milestone_id", milestone.value());
        let runs = self
            .fetch
            .fetch_all(&run_filters, |query| self.api.get_runs(project, query))?;
        log::debug!("Milestone {} has {} runs", milestone, runs.num_rows());

        let mut tables = Vec::with_capacity(runs.num_rows());
        for record in runs.rows() {
            let run: RunId = record_id(record, "id", "run")?;
            tables.push(self.dataframe_from_run(run, filters)?);
        }
        Ok(Table::concat(tables))
    }
}
