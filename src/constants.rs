// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

use std::time::Duration;

// ---------------------------------------------------------------------------
// TestRail API boundaries
// ---------------------------------------------------------------------------

/// How many records TestRail returns per page of a bulk endpoint.
///
/// 250 is the API maximum. A page of exactly this size means another page
/// may follow; anything else ends pagination.
pub const TESTRAIL_PAGE_SIZE: usize = 250;

/// Path segment between the instance base URL and the endpoint name.
pub const TESTRAIL_API_PATH: &str = "index.php?/api/v2/";

// ---------------------------------------------------------------------------
// Retry boundaries
// ---------------------------------------------------------------------------

/// Total attempts for a single page fetch, including the first one.
pub const PAGE_FETCH_MAX_ATTEMPTS: u32 = 5;

/// Fixed pause between two attempts of the same page fetch.
pub const PAGE_FETCH_RETRY_DELAY: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Substring that marks a column as a TestRail custom field.
pub const CUSTOM_FIELD_MARKER: &str = "custom_";

/// Suffix of the label column appended for each custom field column.
pub const CUSTOM_FIELD_LABEL_SUFFIX: &str = "_value";

/// Prefix of the placeholder written when an identifier cannot be resolved.
pub const UNKNOWN_LABEL_PREFIX: &str = "UNKNOWN";

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub const ENV_TESTRAIL_URL: &str = "TESTRAIL_URL";
pub const ENV_TESTRAIL_EMAIL: &str = "TESTRAIL_EMAIL";
pub const ENV_TESTRAIL_PASSWORD: &str = "TESTRAIL_PASSWORD";
pub const ENV_TESTRAIL_VERIFY: &str = "TESTRAIL_VERIFY";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
