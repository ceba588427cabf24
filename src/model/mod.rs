// src/model/mod.rs
//! Tabular data model: records as returned by the API, and the tables built
//! from them.

mod table;

pub use table::{Page, Record, Table};
