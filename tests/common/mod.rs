// tests/common/mod.rs
//! In-memory TestRail stand-in shared by the integration tests.
#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use testrail_frames::{
    Endpoint, Filters, Page, PaginatedFetch, Record, RetryPolicy, TestRailApi, TestRailError,
};

/// One recorded request.
#[derive(Debug, Clone)]
pub struct Call {
    pub path: String,
    pub filters: Filters,
}

/// Serves canned lists (sliced by `offset`/`limit`) and single records.
#[derive(Default)]
pub struct FakeApi {
    lists: HashMap<String, Vec<Record>>,
    records: HashMap<String, Record>,
    failures: RefCell<HashMap<String, usize>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, endpoint: Endpoint, items: Vec<Value>) -> Self {
        self.lists.insert(endpoint.path(), items.into_iter().map(record).collect());
        self
    }

    pub fn with_record(mut self, endpoint: Endpoint, item: Value) -> Self {
        self.records.insert(endpoint.path(), record(item));
        self
    }

    /// The next `times` requests to `endpoint` fail with a connection error.
    pub fn failing(self, endpoint: Endpoint, times: usize) -> Self {
        self.failures.borrow_mut().insert(endpoint.path(), times);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, endpoint: &Endpoint) -> Vec<Call> {
        let path = endpoint.path();
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.path == path)
            .cloned()
            .collect()
    }

    fn record_call(&self, path: &str, filters: &Filters) -> Result<(), TestRailError> {
        self.calls.borrow_mut().push(Call {
            path: path.to_string(),
            filters: filters.clone(),
        });

        if let Some(remaining) = self.failures.borrow_mut().get_mut(path) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(connection_error());
            }
        }
        Ok(())
    }
}

impl TestRailApi for FakeApi {
    fn get_page(&self, endpoint: &Endpoint, filters: &Filters) -> Result<Page, TestRailError> {
        let path = endpoint.path();
        self.record_call(&path, filters)?;

        let all = self.lists.get(&path).cloned().unwrap_or_default();
        let offset = filters.get("offset").and_then(Value::as_u64).unwrap_or(0) as usize;
        let limit = filters
            .get("limit")
            .and_then(Value::as_u64)
            .map(|l| l as usize)
            .unwrap_or(all.len());

        Ok(all.into_iter().skip(offset).take(limit).collect())
    }

    fn get_record(&self, endpoint: &Endpoint) -> Result<Record, TestRailError> {
        let path = endpoint.path();
        self.record_call(&path, &Filters::new())?;

        self.records
            .get(&path)
            .cloned()
            .ok_or_else(|| TestRailError::MalformedResponse(format!("no fixture for {}", path)))
    }
}

pub fn record(value: Value) -> Record {
    serde_json::from_value(value).expect("fixture must be a JSON object")
}

/// A transient transport error, built without touching the network.
pub fn connection_error() -> TestRailError {
    let err = reqwest::blocking::Client::new()
        .get("http://")
        .send()
        .expect_err("an empty host never sends");
    TestRailError::Connection(err)
}

/// `{"id": i, "status_id": 2, "test_id": 1}` for i in 0..size.
pub fn results(size: usize) -> Vec<Value> {
    (0..size)
        .map(|i| json!({"id": i, "status_id": 2, "test_id": 1}))
        .collect()
}

/// Default paging and retry counts, with sleeps recorded instead of slept.
pub fn recording_fetch() -> (PaginatedFetch, Arc<Mutex<Vec<Duration>>>) {
    let sleeps = Arc::new(Mutex::new(Vec::<Duration>::new()));
    let recorder = Arc::clone(&sleeps);
    let fetch = PaginatedFetch::new(250, RetryPolicy::default())
        .with_sleeper(Arc::new(move |d: Duration| recorder.lock().push(d)));
    (fetch, sleeps)
}
