// src/api/endpoints.rs
//! The TestRail v2 endpoints this crate reads from.

use crate::types::{CaseId, MilestoneId, PlanId, ProjectId, RunId, TestId};

/// A GET endpoint, with the IDs that go into its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Runs(ProjectId),
    Run(RunId),
    Plans(ProjectId),
    Plan(PlanId),
    ResultsForCase(RunId, CaseId),
    Results(TestId),
    ResultsForRun(RunId),
    Milestone(MilestoneId),
    Cases(ProjectId),
    Tests(RunId),
    Sections(ProjectId),
    Templates(ProjectId),
    CaseTypes,
    Priorities,
    Suites(ProjectId),
    Statuses,
    CaseFields,
}

impl Endpoint {
    /// Path relative to the API root, e.g. `get_results_for_case/23/2567`.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Runs(project) => format!("get_runs/{}", project),
            Endpoint::Run(run) => format!("get_run/{}", run),
            Endpoint::Plans(project) => format!("get_plans/{}", project),
            Endpoint::Plan(plan) => format!("get_plan/{}", plan),
            Endpoint::ResultsForCase(run, case) => {
                format!("get_results_for_case/{}/{}", run, case)
            }
            Endpoint::Results(test) => format!("get_results/{}", test),
            Endpoint::ResultsForRun(run) => format!("get_results_for_run/{}", run),
            Endpoint::Milestone(milestone) => format!("get_milestone/{}", milestone),
            Endpoint::Cases(project) => format!("get_cases/{}", project),
            Endpoint::Tests(run) => format!("get_tests/{}", run),
            Endpoint::Sections(project) => format!("get_sections/{}", project),
            Endpoint::Templates(project) => format!("get_templates/{}", project),
            Endpoint::CaseTypes => "get_case_types".to_string(),
            Endpoint::Priorities => "get_priorities".to_string(),
            Endpoint::Suites(project) => format!("get_suites/{}", project),
            Endpoint::Statuses => "get_statuses".to_string(),
            Endpoint::CaseFields => "get_case_fields".to_string(),
        }
    }

    /// Key under which TestRail 6.7+ wraps the list of a bulk endpoint.
    pub fn collection_key(&self) -> Option<&'static str> {
        match self {
            Endpoint::Runs(_) => Some("runs"),
            Endpoint::Plans(_) => Some("plans"),
            Endpoint::ResultsForCase(..) | Endpoint::Results(_) | Endpoint::ResultsForRun(_) => {
                Some("results")
            }
            Endpoint::Cases(_) => Some("cases"),
            Endpoint::Tests(_) => Some("tests"),
            Endpoint::Sections(_) => Some("sections"),
            _ => None,
        }
    }
}
