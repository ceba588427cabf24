// src/api/mod.rs
//! TestRail API interaction: the ability to read records from an instance.
//!
//! Business logic depends on [`TestRailApi`], never on HTTP details.

pub mod client;
pub mod endpoints;
pub mod pagination;
pub mod parser;
pub mod types;

use crate::error::TestRailError;
use crate::model::{Page, Record};
use crate::types::{CaseId, MilestoneId, PlanId, ProjectId, RunId, TestId};
use endpoints::Endpoint;
use types::Filters;

/// The ability to read records from a TestRail instance.
///
/// Implementors provide the two raw operations; the per-entity methods are
/// thin conveniences over them. Filters are forwarded unchanged.
pub trait TestRailApi {
    /// Reads one page of a bulk endpoint.
    fn get_page(&self, endpoint: &Endpoint, filters: &Filters) -> Result<Page, TestRailError>;

    /// Reads a single object.
    fn get_record(&self, endpoint: &Endpoint) -> Result<Record, TestRailError>;

    fn get_runs(&self, project: ProjectId, filters: &Filters) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Runs(project), filters)
    }

    fn get_run(&self, run: RunId) -> Result<Record, TestRailError> {
        self.get_record(&Endpoint::Run(run))
    }

    fn get_plans(&self, project: ProjectId, filters: &Filters) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Plans(project), filters)
    }

    fn get_plan(&self, plan: PlanId) -> Result<Record, TestRailError> {
        self.get_record(&Endpoint::Plan(plan))
    }

    fn get_results_for_case(
        &self,
        run: RunId,
        case: CaseId,
        filters: &Filters,
    ) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::ResultsForCase(run, case), filters)
    }

    fn get_results(&self, test: TestId, filters: &Filters) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Results(test), filters)
    }

    fn get_results_for_run(&self, run: RunId, filters: &Filters) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::ResultsForRun(run), filters)
    }

    fn get_milestone(&self, milestone: MilestoneId) -> Result<Record, TestRailError> {
        self.get_record(&Endpoint::Milestone(milestone))
    }

    fn get_cases(&self, project: ProjectId, filters: &Filters) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Cases(project), filters)
    }

    fn get_tests(&self, run: RunId, filters: &Filters) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Tests(run), filters)
    }

    fn get_sections(&self, project: ProjectId, filters: &Filters) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Sections(project), filters)
    }

    fn get_templates(&self, project: ProjectId) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Templates(project), &Filters::new())
    }

    fn get_case_types(&self) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::CaseTypes, &Filters::new())
    }

    fn get_priorities(&self) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Priorities, &Filters::new())
    }

    fn get_suites(&self, project: ProjectId) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Suites(project), &Filters::new())
    }

    fn get_statuses(&self) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::Statuses, &Filters::new())
    }

    fn get_case_fields(&self) -> Result<Page, TestRailError> {
        self.get_page(&Endpoint::CaseFields, &Filters::new())
    }
}

// Re-export the public interface
pub use client::TestRailHttpClient;
pub use pagination::PaginatedFetch;
