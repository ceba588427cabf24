// src/api/client.rs
//! Blocking HTTP client for the TestRail v2 API.
//!
//! This module owns the transport session and basic auth. It knows how
//! TestRail lays out its URLs but nothing about pagination or tables.

use super::endpoints::Endpoint;
use super::parser;
use super::types::Filters;
use super::TestRailApi;
use crate::config::ClientConfig;
use crate::error::TestRailError;
use crate::model::{Page, Record};
use parking_lot::Mutex;
use reqwest::blocking::{Client, Response};
use reqwest::header;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::form_urlencoded;

/// A TestRail client over a replaceable blocking reqwest session.
pub struct TestRailHttpClient {
    config: ClientConfig,
    session: Mutex<Client>,
    resets: AtomicUsize,
}

impl TestRailHttpClient {
    /// Creates a new client from a resolved configuration.
    pub fn new(config: ClientConfig) -> Result<Self, TestRailError> {
        let session = Self::build_session(&config)?;
        Ok(Self {
            config,
            session: Mutex::new(session),
            resets: AtomicUsize::new(0),
        })
    }

    /// Creates a client from the `TESTRAIL_*` environment variables.
    pub fn from_env() -> Result<Self, TestRailError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// How many times the session has been replaced after a connection
    /// failure.
    pub fn session_resets(&self) -> usize {
        self.resets.load(Ordering::Relaxed)
    }

    fn build_session(config: &ClientConfig) -> Result<Client, TestRailError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(TestRailError::Http)
    }

    /// Swaps in a fresh session carrying the original settings.
    fn reset_session(&self) -> Result<(), TestRailError> {
        let fresh = Self::build_session(&self.config)?;
        *self.session.lock() = fresh;
        self.resets.fetch_add(1, Ordering::Relaxed);
        log::debug!("Replaced HTTP session for {}", self.config.base_url);
        Ok(())
    }

    /// Full request URL for an endpoint and its query filters.
    pub fn url_for(&self, endpoint: &Endpoint, filters: &Filters) -> String {
        build_url(&self.config.base_url.api_root(), endpoint, filters)
    }

    /// Makes an authenticated GET request.
    ///
    /// A connection failure, whether on send or while reading the body,
    /// replaces the session before the error is returned.
    fn get(
        &self,
        endpoint: &Endpoint,
        filters: &Filters,
    ) -> Result<ApiResponse<String>, TestRailError> {
        let url = self.url_for(endpoint, filters);
        log::debug!("GET {}", url);

        let session = self.session.lock().clone();
        let outcome = session
            .get(&url)
            .basic_auth(
                self.config.username.as_str(),
                Some(self.config.password.as_str()),
            )
            .send()
            .map_err(TestRailError::from)
            .and_then(extract_response_text);

        match outcome {
            Err(TestRailError::Connection(e)) => {
                log::warn!("Connection to {} failed: {}", self.config.base_url, e);
                self.reset_session()?;
                Err(TestRailError::Connection(e))
            }
            other => other,
        }
    }
}

impl TestRailApi for TestRailHttpClient {
    fn get_page(&self, endpoint: &Endpoint, filters: &Filters) -> Result<Page, TestRailError> {
        let response = self.get(endpoint, filters)?;
        parser::parse_page_response(response, endpoint)
    }

    fn get_record(&self, endpoint: &Endpoint) -> Result<Record, TestRailError> {
        let response = self.get(endpoint, &Filters::new())?;
        parser::parse_record_response(response)
    }
}

/// Builds `<api_root><path>&key=value...`.
///
/// TestRail puts the endpoint itself in the query string, so filters are
/// appended with `&` rather than `?`.
pub fn build_url(api_root: &str, endpoint: &Endpoint, filters: &Filters) -> String {
    let mut url = format!("{}{}", api_root, endpoint.path());
    for (key, value) in filters.iter() {
        url.push('&');
        url.extend(form_urlencoded::byte_serialize(key.as_bytes()));
        url.push('=');
        url.extend(form_urlencoded::byte_serialize(
            query_value(value).as_bytes(),
        ));
    }
    url
}

/// TestRail's query conventions: lists are comma separated, booleans are 1/0.
fn query_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(query_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub fn extract_response_text(response: Response) -> Result<ApiResponse<String>, TestRailError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text()?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
