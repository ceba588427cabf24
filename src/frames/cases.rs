// src/frames/cases.rs
use crate::api::types::Filters;
use crate::api::{PaginatedFetch, TestRailApi};
use crate::enrichment::{EnrichScope, LookupEnricher};
use crate::error::TestRailError;
use crate::model::Table;
use crate::types::{ProjectId, SuiteId};

/// Test cases as tables, optionally with label columns.
pub struct Cases<'a> {
    api: &'a dyn TestRailApi,
    fetch: &'a PaginatedFetch,
    verbose: bool,
}

impl<'a> Cases<'a> {
    pub(super) fn new(api: &'a dyn TestRailApi, fetch: &'a PaginatedFetch, verbose: bool) -> Self {
        Self {
            api,
            fetch,
            verbose,
        }
    }

    /// All cases of a project matching `filters`.
    ///
    /// With `enrich`, sections are looked up in the suite named by the
    /// `suite_id` filter (or the project's only suite when absent).
    pub fn to_dataframe(
        &self,
        project: ProjectId,
        filters: &Filters,
        enrich: bool,
    ) -> Result<Table, TestRailError> {
        let table = self
            .fetch
            .fetch_all(filters, |query| self.api.get_cases(project, query))?;
        if !enrich {
            return Ok(table);
        }

        let suite = filters
            .get("suite_id")
            .and_then(|v| v.as_u64().or_else(|| v.as_str()?.trim().parse().ok()))
            .and_then(|v| SuiteId::new(v).ok());
        let scope = EnrichScope::project(project).with_suite(suite);

        LookupEnricher::new(self.api, self.fetch)
            .verbose(self.verbose)
            .enrich(table, &scope)
    }
}
