// tests/frames.rs
//! Multi-request table operations: plans, milestones and run tests.

mod common;

use common::{recording_fetch, results, FakeApi};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use testrail_frames::{
    Endpoint, Filters, MilestoneId, PlanId, ProjectId, RunId, TestRail, TestRailError,
};

fn ids(values: impl Iterator<Item = Value>) -> Vec<Value> {
    values.collect()
}

#[test]
fn results_from_milestone_follow_its_runs() {
    let project = ProjectId::new(9).unwrap();
    let milestone = MilestoneId::new(1).unwrap();
    let run = RunId::new(1).unwrap();
    let api = FakeApi::new()
        .with_list(
            Endpoint::Runs(project),
            vec![json!({"id": 1, "name": "My run", "is_completed": 0})],
        )
        .with_list(Endpoint::ResultsForRun(run), results(1));
    let (fetch, _) = recording_fetch();
    let testrail = TestRail::with_fetch(&api, fetch);

    let table = testrail
        .results()
        .dataframe_from_milestone(project, milestone, &Filters::new())
        .unwrap();

    assert_eq!(table.cell(0, "status_id"), Some(&json!(2)));
    assert_eq!(table.num_rows(), 1);
    let run_calls = api.calls_to(&Endpoint::Runs(project));
    assert_eq!(run_calls[0].filters.get("milestone_id"), Some(&json!(1)));
}

#[test]
fn results_from_milestone_without_runs_is_empty() {
    let project = ProjectId::new(9).unwrap();
    let api = FakeApi::new().with_list(Endpoint::Runs(project), vec![]);
    let (fetch, _) = recording_fetch();
    let testrail = TestRail::with_fetch(&api, fetch);

    let table = testrail
        .results()
        .dataframe_from_milestone(project, MilestoneId::new(3).unwrap(), &Filters::new())
        .unwrap();

    assert!(table.is_empty());
    assert_eq!(api.calls().len(), 1);
}

#[test]
fn plan_runs_are_flattened_across_entries() {
    let plan = PlanId::new(80).unwrap();
    let api = FakeApi::new().with_record(
        Endpoint::Plan(plan),
        json!({
            "id": 80,
            "entries": [
                {"id": "a", "runs": [{"id": 81, "name": "Chrome"}, {"id": 82, "name": "Firefox"}]},
                {"id": "b", "runs": [{"id": 83, "name": "Safari", "config": "macOS"}]}
            ]
        }),
    );
    let testrail = TestRail::new(&api);

    let table = testrail.runs().dataframe_from_plan(plan).unwrap();

    assert_eq!(table.shape(), (3, 3));
    assert_eq!(
        ids(table.column("id").cloned()),
        vec![json!(81), json!(82), json!(83)]
    );
}

#[test]
fn plan_without_entries_is_an_error() {
    let plan = PlanId::new(80).unwrap();
    let api = FakeApi::new().with_record(Endpoint::Plan(plan), json!({"id": 80}));
    let testrail = TestRail::new(&api);

    let err = testrail.runs().dataframe_from_plan(plan).unwrap_err();
    match err {
        TestRailError::MissingField { entity, field } => {
            assert_eq!((entity, field), ("plan", "entries"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sub_milestones_are_collected_depth_first() {
    let m = |id: u64| MilestoneId::new(id).unwrap();
    let api = FakeApi::new()
        .with_record(
            Endpoint::Milestone(m(1)),
            json!({
                "id": 1,
                "milestones": [{"id": 2, "name": "Sprint 1"}, {"id": 3, "name": "Sprint 2"}]
            }),
        )
        .with_record(
            Endpoint::Milestone(m(2)),
            json!({
                "id": 2,
                "milestones": [{"id": 4, "name": "Sprint 1 / week 1"}, {"id": 1, "name": "cycle"}]
            }),
        )
        .with_record(
            Endpoint::Milestone(m(3)),
            json!({"id": 3, "milestones": []}),
        )
        .with_record(Endpoint::Milestone(m(4)), json!({"id": 4}));
    let testrail = TestRail::new(&api);

    let table = testrail.milestones().sub_milestones(m(1)).unwrap();

    assert_eq!(
        ids(table.column("id").cloned()),
        vec![json!(2), json!(4), json!(3)]
    );
    assert_eq!(api.calls().len(), 4);
}

#[test]
fn run_tests_are_enriched_with_the_run_scope() {
    let run = RunId::new(12).unwrap();
    let project = ProjectId::new(9).unwrap();
    let priority_field = json!({
        "system_name": "custom_priority",
        "configs": [{
            "context": {"is_global": false, "project_ids": [9]},
            "options": {"items": "1,Low\n2,High"}
        }]
    });
    let api = FakeApi::new()
        .with_list(
            Endpoint::Tests(run),
            vec![
                json!({"id": 100, "status_id": 1, "custom_priority": 2}),
                json!({"id": 101, "status_id": 5, "custom_priority": null}),
            ],
        )
        .with_record(
            Endpoint::Run(run),
            json!({"id": 12, "project_id": 9, "suite_id": 4}),
        )
        .with_list(
            Endpoint::Statuses,
            vec![
                json!({"id": 1, "name": "passed", "label": "Passed"}),
                json!({"id": 5, "name": "failed", "label": "Failed"}),
            ],
        )
        .with_list(Endpoint::CaseFields, vec![priority_field]);
    let (fetch, _) = recording_fetch();
    let testrail = TestRail::with_fetch(&api, fetch);

    let table = testrail
        .tests()
        .to_dataframe(run, &Filters::new(), true)
        .unwrap();

    assert_eq!(
        ids(table.column("status_name").cloned()),
        vec![json!("Passed"), json!("Failed")]
    );
    assert_eq!(
        ids(table.column("custom_priority_value").cloned()),
        vec![json!("High"), json!("")]
    );
    assert!(api.calls_to(&Endpoint::Suites(project)).is_empty());
}

#[test]
fn run_tests_without_enrichment_skip_the_run_lookup() {
    let run = RunId::new(12).unwrap();
    let tests = vec![json!({"id": 100, "status_id": 1})];
    let api = FakeApi::new().with_list(Endpoint::Tests(run), tests);
    let testrail = TestRail::new(&api);

    let table = testrail
        .tests()
        .to_dataframe(run, &Filters::new(), false)
        .unwrap();

    assert_eq!(table.shape(), (1, 2));
    assert!(api.calls_to(&Endpoint::Run(run)).is_empty());
}
