// tests/enrichment.rs
//! Label enrichment of case tables against canned meta endpoints.

mod common;

use common::{record, recording_fetch, FakeApi};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use testrail_frames::{
    Endpoint, EnrichScope, Filters, LookupEnricher, ProjectId, SuiteId, Table, TestRail,
};

fn project() -> ProjectId {
    ProjectId::new(9).unwrap()
}

fn labels(table: &Table, column: &str) -> Vec<Value> {
    table.column(column).cloned().collect()
}

fn case_fields() -> Vec<Value> {
    let priority = json!({
        "system_name": "custom_priority",
        "configs": [{
            "context": {"is_global": false, "project_ids": [9]},
            "options": {"items": "1,Low\n2,High"}
        }]
    });
    vec![priority]
}

#[test]
fn custom_field_values_resolve_per_project() {
    let api = FakeApi::new()
        .with_list(
            Endpoint::Cases(project()),
            vec![
                json!({"id": 1, "custom_priority": 1}),
                json!({"id": 2, "custom_priority": 2}),
                json!({"id": 3, "custom_priority": null}),
            ],
        )
        .with_list(Endpoint::CaseFields, case_fields());
    let (fetch, _) = recording_fetch();
    let testrail = TestRail::with_fetch(&api, fetch);

    let table = testrail
        .cases()
        .to_dataframe(project(), &Filters::new(), true)
        .unwrap();

    assert_eq!(
        labels(&table, "custom_priority_value"),
        vec![json!("Low"), json!("High"), json!("")]
    );
}

#[test]
fn standard_columns_get_labels_or_placeholders() {
    let suite = SuiteId::new(4).unwrap();
    let api = FakeApi::new()
        .with_list(
            Endpoint::Cases(project()),
            vec![
                json!({
                    "id": 1, "section_id": 10, "template_id": 1,
                    "type_id": 7, "priority_id": 2, "suite_id": 4
                }),
                json!({
                    "id": 2, "section_id": 99, "template_id": 5,
                    "type_id": 6, "priority_id": 4, "suite_id": 4
                }),
            ],
        )
        .with_list(
            Endpoint::Sections(project()),
            vec![json!({"id": 10, "name": "Login", "suite_id": 4})],
        )
        .with_list(
            Endpoint::Templates(project()),
            vec![json!({"id": 1, "name": "Test Case (Text)"})],
        )
        .with_list(
            Endpoint::CaseTypes,
            vec![
                json!({"id": 6, "name": "Functional"}),
                json!({"id": 7, "name": "Other"}),
            ],
        )
        .with_list(
            Endpoint::Priorities,
            vec![
                json!({"id": 2, "name": "2 - Medium"}),
                json!({"id": 4, "name": "4 - Must Test"}),
            ],
        )
        .with_list(
            Endpoint::Suites(project()),
            vec![json!({"id": 4, "name": "Master"})],
        );
    let (fetch, _) = recording_fetch();
    let testrail = TestRail::with_fetch(&api, fetch);

    let filters = Filters::new().with("suite_id", suite.value());
    let table = testrail
        .cases()
        .to_dataframe(project(), &filters, true)
        .unwrap();

    assert_eq!(
        labels(&table, "section_name"),
        vec![json!("Login"), json!("UNKNOWN 99")]
    );
    assert_eq!(
        labels(&table, "template_name"),
        vec![json!("Test Case (Text)"), json!("UNKNOWN 5")]
    );
    assert_eq!(
        labels(&table, "type_name"),
        vec![json!("Other"), json!("Functional")]
    );
    assert_eq!(
        labels(&table, "priority_name"),
        vec![json!("2 - Medium"), json!("4 - Must Test")]
    );
    assert_eq!(
        labels(&table, "suite_name"),
        vec![json!("Master"), json!("Master")]
    );

    let section_calls = api.calls_to(&Endpoint::Sections(project()));
    assert_eq!(section_calls.len(), 1);
    assert_eq!(section_calls[0].filters.get("suite_id"), Some(&json!(4)));
    assert!(api.calls_to(&Endpoint::CaseFields).is_empty());
}

#[test]
fn enrichment_is_total_over_odd_values() {
    let priorities = vec![json!({"id": 1, "name": "Low"})];
    let api = FakeApi::new()
        .with_list(Endpoint::Priorities, priorities)
        .with_list(Endpoint::CaseFields, case_fields());
    let (fetch, _) = recording_fetch();
    let enricher = LookupEnricher::new(&api, &fetch).verbose(true);

    let table = Table::from_records(vec![
        record(json!({"priority_id": 1, "custom_priority": [0, 1, 2]})),
        record(json!({"priority_id": "abc", "custom_priority": 7})),
        record(json!({"custom_priority": "High"})),
        record(json!({"priority_id": 1.0, "custom_priority": {"odd": 1}})),
    ]);
    let scope = EnrichScope::project(project());

    let table = enricher.enrich(table, &scope).unwrap();

    assert_eq!(
        labels(&table, "priority_name"),
        vec![
            json!("Low"),
            json!("UNKNOWN abc"),
            json!("UNKNOWN null"),
            json!("Low"),
        ]
    );
    assert_eq!(
        labels(&table, "custom_priority_value"),
        vec![
            json!("Low,High"),
            json!("UNKNOWN 7"),
            json!("UNKNOWN High"),
            json!("UNKNOWN {\"odd\":1}"),
        ]
    );
    assert!(table.column("custom_priority_value").all(|v| v.is_string()));
}

#[test]
fn lookups_are_refetched_on_every_call() {
    let priorities = vec![json!({"id": 1, "name": "Low"})];
    let api = FakeApi::new().with_list(Endpoint::Priorities, priorities);
    let (fetch, _) = recording_fetch();
    let enricher = LookupEnricher::new(&api, &fetch);
    let table = Table::from_records(vec![record(json!({"priority_id": 1}))]);
    let scope = EnrichScope::project(project());

    enricher.enrich(table.clone(), &scope).unwrap();
    enricher.enrich(table, &scope).unwrap();

    assert_eq!(api.calls_to(&Endpoint::Priorities).len(), 2);
}

#[test]
fn empty_table_needs_no_lookups() {
    let api = FakeApi::new().with_list(Endpoint::Cases(project()), vec![]);
    let (fetch, _) = recording_fetch();
    let testrail = TestRail::with_fetch(&api, fetch);

    let table = testrail
        .cases()
        .to_dataframe(project(), &Filters::new(), true)
        .unwrap();

    assert_eq!(table.shape(), (0, 0));
    assert_eq!(api.calls().len(), 1);
}
