// src/model/table.rs
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;

/// One API record: field name to JSON value, in response order.
pub type Record = IndexMap<String, Value>;

/// One batch of records returned by a single API call.
pub type Page = Vec<Record>;

static NULL: Value = Value::Null;

/// Rows of records sharing the union of their columns.
///
/// A cell whose column is missing from a row's record reads as `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: IndexSet<String>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from one page; columns appear in first-seen order.
    pub fn from_records(records: Page) -> Self {
        let mut table = Self::new();
        table.append_records(records);
        table
    }

    /// Concatenates tables row-wise, unioning their columns.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = Table>,
    {
        let mut combined = Self::new();
        for table in tables {
            combined.columns.extend(table.columns);
            combined.rows.extend(table.rows);
        }
        combined
    }

    /// Appends records as new rows.
    pub fn append_records(&mut self, records: Page) {
        for record in records {
            for key in record.keys() {
                if !self.columns.contains(key) {
                    self.columns.insert(key.clone());
                }
            }
            self.rows.push(record);
        }
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_records(self) -> Vec<Record> {
        self.rows
    }

    /// The cell at `row` in `column`, `Null` if the row lacks that field.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows
            .get(row)
            .map(|record| record.get(column).unwrap_or(&NULL))
    }

    /// Every cell of a column, top to bottom, with `Null` for missing fields.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |record| record.get(name).unwrap_or(&NULL))
    }

    /// Sets (or replaces) a column from one value per row.
    ///
    /// Extra values are ignored; rows without a value get `Null`.
    pub fn insert_column<I>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let name = name.into();
        let mut values = values.into_iter();
        for record in &mut self.rows {
            let value = values.next().unwrap_or(Value::Null);
            record.insert(name.clone(), value);
        }
        self.columns.insert(name);
    }
}
