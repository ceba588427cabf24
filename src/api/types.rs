// src/api/types.rs
//! Request-side types shared by the API collaborator and the fetcher.

use indexmap::IndexMap;
use serde_json::Value;

/// Query filters forwarded verbatim to a TestRail endpoint.
///
/// `offset` and `limit` are owned by the paginated fetcher; see
/// [`Filters::with_paging`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(IndexMap<String, Value>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a filter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of these filters with the managed paging parameters set.
    pub fn with_paging(&self, offset: usize, limit: usize) -> Self {
        self.clone().with("limit", limit).with("offset", offset)
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
