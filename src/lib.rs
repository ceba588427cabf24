// src/lib.rs
//! testrail-frames: TestRail API responses as tables.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `TestRailError`, `ValidationError`
//! - **Configuration**: `ClientConfig`, `init_logging`
//! - **Domain types**: `ProjectId`, `RunId`, `CaseId`, `BaseUrl`, ...
//! - **API client**: `TestRailApi`, `TestRailHttpClient`, `Endpoint`, `Filters`
//! - **Pagination**: `PaginatedFetch`, `RetryPolicy`
//! - **Enrichment**: `LookupEnricher`, `CustomFieldConfig`, `LookupMap`
//! - **Tables**: `Table`, `Record`, and the `TestRail` sub-clients
//!
//! ```no_run
//! use testrail_frames::{Filters, ProjectId, TestRail, TestRailHttpClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TestRailHttpClient::from_env()?;
//! let testrail = TestRail::new(&client);
//! let cases = testrail
//!     .cases()
//!     .to_dataframe(ProjectId::new(9)?, &Filters::new().with("suite_id", 4), true)?;
//! println!("{:?} cases", cases.shape());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod enrichment;
pub mod error;
pub mod error_recovery;
pub mod frames;
pub mod logging;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{Result, TestRailError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::ClientConfig;
pub use crate::logging::init_logging;

// --- Domain Types ---
pub use crate::types::{
    BaseUrl, CaseId, Id, IdKind, MilestoneId, Password, PlanId, ProjectId, RunId, SuiteId, TestId,
    Username,
};

// --- API Client ---
pub use crate::api::{
    client::{build_url, ApiResponse},
    endpoints::Endpoint,
    parser::{parse_page_response, parse_record_response},
    types::Filters,
    PaginatedFetch, TestRailApi, TestRailHttpClient,
};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};

// --- Enrichment ---
pub use crate::enrichment::{
    custom_fields::{CustomFieldConfig, CustomValue, OptionKey, Resolution},
    lookup::{LookupMap, LookupSource},
    EnrichScope, LookupEnricher,
};

// --- Tables ---
pub use crate::frames::{Cases, Milestones, Plans, Results, Runs, TestRail, Tests};
pub use crate::model::{Page, Record, Table};
