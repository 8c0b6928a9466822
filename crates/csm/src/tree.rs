//! Keyspace → table → column → CQL type mapping built from metadata rows.

use crate::{Result, SchemaColumnRow, parse_validator};
use facet::Facet;
use std::collections::BTreeMap;

/// Column name → CQL type name.
pub type TableColumns = BTreeMap<String, String>;

/// Table name → columns.
pub type KeyspaceTables = BTreeMap<String, TableColumns>;

/// Every column of every table, grouped by keyspace and table.
///
/// Serializes as the bare nested object:
///
/// ```text
/// { "ks": { "users": { "id": "uuid", "tags": "set<text>" } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Facet)]
#[facet(transparent)]
pub struct SchemaTree(BTreeMap<String, KeyspaceTables>);

impl SchemaTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tree from column rows.
    ///
    /// Reversed wrappers are dropped: only the CQL type is recorded. If the
    /// same column appears twice, the last row wins. A single row with a
    /// malformed validator fails the whole build.
    pub fn build<'a>(rows: impl IntoIterator<Item = &'a SchemaColumnRow>) -> Result<Self> {
        let mut tree = Self::new();
        for row in rows {
            let parsed = parse_validator(&row.validator)?;
            tree.insert(
                &row.keyspace_name,
                &row.columnfamily_name,
                &row.column_name,
                parsed.cqltype.to_string(),
            );
        }
        Ok(tree)
    }

    fn insert(&mut self, keyspace: &str, table: &str, column: &str, cqltype: String) {
        self.0
            .entry(keyspace.to_string())
            .or_default()
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string(), cqltype);
    }

    pub fn keyspace(&self, keyspace: &str) -> Option<&KeyspaceTables> {
        self.0.get(keyspace)
    }

    pub fn table(&self, keyspace: &str, table: &str) -> Option<&TableColumns> {
        self.keyspace(keyspace)?.get(table)
    }

    /// Keyspace names, sorted.
    pub fn keyspaces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, KeyspaceTables> {
        self.0
    }
}
