// src/frames/mod.rs
//! Per-entity "fetch as table" operations.
//!
//! [`TestRail`] borrows an API collaborator and hands out typed sub-clients.
//! Each sub-client borrows the same collaborator and fetch policy, so the
//! session outlives all of them.

mod cases;
mod milestones;
mod plans;
mod results;
mod runs;

pub use cases::Cases;
pub use milestones::Milestones;
pub use plans::Plans;
pub use results::Results;
pub use runs::Runs;
pub use run_tests::Tests;

use crate::api::{PaginatedFetch, TestRailApi};
use crate::enrichment::LookupEnricher;
use crate::error::TestRailError;
use crate::model::Record;
use crate::types::{Id, IdKind};

/// Entry point for table-shaped access to a TestRail instance.
pub struct TestRail<'a> {
    api: &'a dyn TestRailApi,
    fetch: PaginatedFetch,
    verbose: bool,
}

impl<'a> TestRail<'a> {
    /// Wraps an API collaborator with the default paging and retry policy.
    pub fn new(api: &'a dyn TestRailApi) -> Self {
        Self::with_fetch(api, PaginatedFetch::default())
    }

    pub fn with_fetch(api: &'a dyn TestRailApi, fetch: PaginatedFetch) -> Self {
        Self {
            api,
            fetch,
            verbose: false,
        }
    }

    /// Log enrichment misses as warnings.
    pub fn verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }

    pub fn runs(&self) -> Runs<'_> {
        Runs::new(self.api, &self.fetch)
    }

    pub fn plans(&self) -> Plans<'_> {
        Plans::new(self.api, &self.fetch)
    }

    pub fn results(&self) -> Results<'_> {
        Results::new(self.api, &self.fetch)
    }

    pub fn milestones(&self) -> Milestones<'_> {
        Milestones::new(self.api)
    }

    pub fn cases(&self) -> Cases<'_> {
        Cases::new(self.api, &self.fetch, self.verbose)
    }

    pub fn tests(&self) -> Tests<'_> {
        Tests::new(self.api, &self.fetch, self.verbose)
    }

    /// The enricher, for tables assembled by hand.
    pub fn enricher(&self) -> LookupEnricher<'_> {
        LookupEnricher::new(self.api, &self.fetch).verbose(self.verbose)
    }
}

/// Reads a positive integer field of a record as a typed ID.
pub(crate) fn record_id<T: IdKind>(
    record: &Record,
    field: &'static str,
    entity: &'static str,
) -> Result<Id<T>, TestRailError> {
    record
        .get(field)
        .and_then(|v| v.as_u64())
        .and_then(|v| Id::new(v).ok())
        .ok_or(TestRailError::MissingField { entity, field })
}

/// Like [`record_id`], but a null or missing field is `None`.
pub(crate) fn optional_record_id<T: IdKind>(record: &Record, field: &str) -> Option<Id<T>> {
    record
        .get(field)
        .and_then(|v| v.as_u64())
        .and_then(|v| Id::new(v).ok())
}
