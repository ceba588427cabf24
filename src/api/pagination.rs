// src/api/pagination.rs
//! Offset pagination with per-page retry.
//!
//! TestRail bulk endpoints take `limit`/`offset` and give no total count.
//! A page of exactly `page_size` records means there may be more; any other
//! length ends the walk.

use super::types::Filters;
use crate::constants::TESTRAIL_PAGE_SIZE;
use crate::error::TestRailError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{Page, Table};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// How the fetcher waits between retry attempts.
pub type Sleeper = Arc<dyn Fn(Duration) + Send + Sync>;

/// Drives a page-fetching closure across offsets and concatenates the pages.
#[derive(Clone)]
pub struct PaginatedFetch {
    page_size: usize,
    retry: RetryPolicy,
    sleeper: Sleeper,
}

impl PaginatedFetch {
    pub fn new(page_size: usize, retry: RetryPolicy) -> Self {
        Self {
            page_size: page_size.max(1),
            retry,
            sleeper: Arc::new(std::thread::sleep),
        }
    }

    /// Replaces `std::thread::sleep` between retries.
    pub fn with_sleeper(self, sleeper: Sleeper) -> Self {
        Self { sleeper, ..self }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Fetches every page for `filters` and returns them as one table.
    ///
    /// `fetch_page` receives the caller's filters plus `offset` and `limit`.
    /// Fails with [`TestRailError::ManagedOffset`] before any request if the
    /// caller already set `offset`. Pages fetched before a failure are
    /// discarded.
    pub fn fetch_all<F>(
        &self,
        filters: &Filters,
        mut fetch_page: F,
    ) -> Result<Table, TestRailError>
    where
        F: FnMut(&Filters) -> Result<Page, TestRailError>,
    {
        if filters.contains("offset") {
            return Err(TestRailError::ManagedOffset);
        }
        if let Some(limit) = filters.get("limit") {
            log::warn!(
                "Ignoring caller limit {}; pages are fetched {} at a time",
                limit,
                self.page_size
            );
        }

        let mut table = Table::new();
        let mut offset = 0;
        let mut requests = 0;

        loop {
            let query = filters.with_paging(offset, self.page_size);
            let page = retry_with_backoff(|| fetch_page(&query), &self.retry, &*self.sleeper)?;
            requests += 1;

            let fetched = page.len();
            table.append_records(page);
            log::debug!("Fetched {} records at offset {}", fetched, offset);

            if fetched != self.page_size {
                break;
            }
            offset += self.page_size;
        }

        log::debug!(
            "Pagination finished: {} rows in {} requests",
            table.num_rows(),
            requests
        );
        Ok(table)
    }
}

impl Default for PaginatedFetch {
    fn default() -> Self {
        Self::new(TESTRAIL_PAGE_SIZE, RetryPolicy::default())
    }
}

impl fmt::Debug for PaginatedFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedFetch")
            .field("page_size", &self.page_size)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
