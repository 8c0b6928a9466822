//! Primary key reconstruction from column metadata rows.
//!
//! A CQL primary key is a partition key (one or more columns, grouped) followed
//! by zero or more clustering columns, each sorted ascending or descending:
//!
//! ```text
//! PRIMARY KEY ((tenant, day), ts, id)
//! WITH CLUSTERING ORDER BY (ts DESC, id ASC)
//! ```
//!
//! The metadata rows only carry each column's key role and its position within
//! that role. Descending clustering columns are recognised by their validator
//! being wrapped in `ReversedType`.

use crate::{Error, KeyRole, Result, SchemaColumnRow, parse_validator};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Sort order of a clustering column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of [`PrimaryKey::full_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyComponent {
    /// All partition key columns, in order.
    Partition(Vec<String>),
    Clustering(String),
}

/// A table's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    partition_key: Vec<String>,
    clustering_key: Vec<String>,
    reversed_clustering_columns: BTreeSet<String>,
}

impl PrimaryKey {
    /// Create a primary key.
    ///
    /// Fails with [`Error::EmptyPartitionKey`] if `partition_key` is empty.
    pub fn new(
        partition_key: Vec<String>,
        clustering_key: Vec<String>,
        reversed_clustering_columns: impl IntoIterator<Item = String>,
    ) -> Result<Self> {
        if partition_key.is_empty() {
            return Err(Error::EmptyPartitionKey);
        }
        Ok(Self {
            partition_key,
            clustering_key,
            reversed_clustering_columns: reversed_clustering_columns.into_iter().collect(),
        })
    }

    /// Rebuild the primary key of a single table from its metadata rows.
    ///
    /// Rows are ordered by `component_index` (stable, so rows sharing an index
    /// keep their input order). Regular columns are ignored, except that their
    /// keyspace/table still counts towards the single-table check.
    ///
    /// # Errors
    ///
    /// - [`Error::MultiTableInput`] if the rows span more than one table.
    /// - [`Error::EmptyPartitionKey`] if no row has the partition key role.
    /// - Validator errors from parsing a clustering column's validator.
    pub fn reconstruct<'a>(rows: impl IntoIterator<Item = &'a SchemaColumnRow>) -> Result<Self> {
        let mut rows: Vec<&SchemaColumnRow> = rows.into_iter().collect();

        let tables: BTreeSet<(&str, &str)> = rows.iter().map(|r| r.table_ref()).collect();
        if tables.len() > 1 {
            return Err(Error::MultiTableInput {
                tables: tables
                    .into_iter()
                    .map(|(keyspace, table)| (keyspace.to_string(), table.to_string()))
                    .collect(),
            });
        }

        rows.sort_by_key(|r| r.component_index);

        let partition_key: Vec<String> = rows
            .iter()
            .filter(|r| r.kind == KeyRole::PartitionKey)
            .map(|r| r.column_name.clone())
            .collect();

        let mut clustering_key = Vec::new();
        let mut reversed = Vec::new();
        for row in rows.iter().filter(|r| r.kind == KeyRole::ClusteringKey) {
            clustering_key.push(row.column_name.clone());
            if parse_validator(&row.validator)?.is_reversed {
                reversed.push(row.column_name.clone());
            }
        }

        debug!(
            ?partition_key,
            ?clustering_key,
            ?reversed,
            "reconstructed primary key"
        );

        Self::new(partition_key, clustering_key, reversed)
    }

    pub fn partition_key(&self) -> &[String] {
        &self.partition_key
    }

    pub fn clustering_key(&self) -> &[String] {
        &self.clustering_key
    }

    pub fn reversed_clustering_columns(&self) -> &BTreeSet<String> {
        &self.reversed_clustering_columns
    }

    /// Sort order of a clustering column, `None` for any other column.
    pub fn order_of(&self, column: &str) -> Option<SortOrder> {
        if !self.clustering_key.iter().any(|c| c == column) {
            return None;
        }
        if self.reversed_clustering_columns.contains(column) {
            Some(SortOrder::Desc)
        } else {
            Some(SortOrder::Asc)
        }
    }

    /// Sort order of every clustering column. Partition key columns are not
    /// included.
    pub fn clustering_order(&self) -> BTreeMap<&str, SortOrder> {
        self.clustering_key
            .iter()
            .filter_map(|c| Some((c.as_str(), self.order_of(c)?)))
            .collect()
    }

    /// The partition key as one grouped component, then each clustering column.
    pub fn full_key(&self) -> Vec<KeyComponent> {
        let mut full_key = vec![KeyComponent::Partition(self.partition_key.clone())];
        full_key.extend(
            self.clustering_key
                .iter()
                .cloned()
                .map(KeyComponent::Clustering),
        );
        full_key
    }

    /// Render the `PRIMARY KEY (...)` clause.
    pub fn to_cql(&self) -> String {
        let partition = if self.partition_key.len() == 1 {
            self.partition_key[0].clone()
        } else {
            format!("({})", self.partition_key.join(", "))
        };

        let mut parts = vec![partition];
        parts.extend(self.clustering_key.iter().cloned());
        format!("PRIMARY KEY ({})", parts.join(", "))
    }

    /// Render the `WITH CLUSTERING ORDER BY (...)` clause, if there are
    /// clustering columns.
    pub fn clustering_order_cql(&self) -> Option<String> {
        if self.clustering_key.is_empty() {
            return None;
        }
        let columns: Vec<String> = self
            .clustering_key
            .iter()
            .map(|c| format!("{} {}", c, self.order_of(c).unwrap_or_default()))
            .collect();
        Some(format!("WITH CLUSTERING ORDER BY ({})", columns.join(", ")))
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cql())?;
        if let Some(order) = self.clustering_order_cql() {
            write!(f, " {}", order)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INT: &str = "org.apache.cassandra.db.marshal.Int32Type";
    const REVERSED_INT: &str =
        "org.apache.cassandra.db.marshal.ReversedType(org.apache.cassandra.db.marshal.Int32Type)";

    fn partition(column: &str, index: u32) -> SchemaColumnRow {
        SchemaColumnRow::new("keyspace", "table", column, INT).with_key(KeyRole::PartitionKey, index)
    }

    fn clustering(column: &str, index: u32, validator: &str) -> SchemaColumnRow {
        SchemaColumnRow::new("keyspace", "table", column, validator)
            .with_key(KeyRole::ClusteringKey, index)
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_partition() {
        let key = PrimaryKey::reconstruct(&[partition("a", 0)]).unwrap();
        assert_eq!(key.partition_key(), ["a"]);
        assert!(key.clustering_key().is_empty());
        assert!(key.clustering_order().is_empty());
    }

    #[test]
    fn test_partition_sorted_by_component_index() {
        let rows = [partition("a", 0), partition("b", 1)];
        assert_eq!(PrimaryKey::reconstruct(&rows).unwrap().partition_key(), ["a", "b"]);

        let rows = [partition("a", 1), partition("b", 0)];
        assert_eq!(PrimaryKey::reconstruct(&rows).unwrap().partition_key(), ["b", "a"]);
    }

    #[test]
    fn test_clustering_sorted_by_component_index() {
        let rows = [
            partition("a", 0),
            clustering("b", 1, INT),
            clustering("c", 0, INT),
        ];
        let key = PrimaryKey::reconstruct(&rows).unwrap();
        assert_eq!(key.partition_key(), ["a"]);
        assert_eq!(key.clustering_key(), ["c", "b"]);
        assert_eq!(
            key.clustering_order(),
            BTreeMap::from([("b", SortOrder::Asc), ("c", SortOrder::Asc)])
        );
    }

    #[test]
    fn test_clustering_order_from_reversed_validator() {
        let rows = [
            partition("a", 0),
            clustering("b", 0, INT),
            clustering("c", 1, REVERSED_INT),
        ];
        let key = PrimaryKey::reconstruct(&rows).unwrap();
        assert_eq!(key.clustering_key(), ["b", "c"]);
        assert_eq!(
            key.clustering_order(),
            BTreeMap::from([("b", SortOrder::Asc), ("c", SortOrder::Desc)])
        );
        assert_eq!(key.order_of("a"), None);
        assert!(key.reversed_clustering_columns().contains("c"));
    }

    #[test]
    fn test_regular_columns_are_ignored() {
        let rows = [
            SchemaColumnRow::new("keyspace", "table", "value", INT),
            partition("a", 0),
        ];
        let key = PrimaryKey::reconstruct(&rows).unwrap();
        assert_eq!(key.partition_key(), ["a"]);
        assert!(key.clustering_key().is_empty());
    }

    #[test]
    fn test_no_partition_fails() {
        let rows = [clustering("a", 0, INT)];
        assert_eq!(
            PrimaryKey::reconstruct(&rows).unwrap_err(),
            Error::EmptyPartitionKey
        );
        assert_eq!(
            PrimaryKey::reconstruct(&[] as &[SchemaColumnRow]).unwrap_err(),
            Error::EmptyPartitionKey
        );
    }

    #[test]
    fn test_multiple_tables_fail() {
        let other = SchemaColumnRow::new("keyspace", "other", "a", INT)
            .with_key(KeyRole::PartitionKey, 0);
        let rows = [partition("a", 0), other];
        let err = PrimaryKey::reconstruct(&rows).unwrap_err();
        assert_eq!(
            err,
            Error::MultiTableInput {
                tables: BTreeSet::from([
                    ("keyspace".to_string(), "other".to_string()),
                    ("keyspace".to_string(), "table".to_string()),
                ])
            }
        );
        assert_eq!(
            err.to_string(),
            "the rows supplied represent more than one table: keyspace.other, keyspace.table"
        );
    }

    #[test]
    fn test_invalid_clustering_validator_propagates() {
        let rows = [
            partition("a", 0),
            clustering("b", 0, "org.apache.cassandra.db.marshal.FrobType"),
        ];
        assert!(matches!(
            PrimaryKey::reconstruct(&rows),
            Err(Error::InvalidValidator { .. })
        ));
    }

    #[test]
    fn test_new_requires_partition_key() {
        assert_eq!(
            PrimaryKey::new(vec![], strings(&["b"]), Vec::<String>::new()).unwrap_err(),
            Error::EmptyPartitionKey
        );
    }

    #[test]
    fn test_full_key() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["a"], &[]),
            (&["a"], &["b"]),
            (&["a"], &["b", "c"]),
            (&["a", "b"], &[]),
            (&["a", "b"], &["b"]),
            (&["a", "b"], &["b", "c"]),
        ];
        for (partition, clustering) in cases {
            let key = PrimaryKey::new(strings(partition), strings(clustering), Vec::<String>::new()).unwrap();
            let mut expected = vec![KeyComponent::Partition(strings(partition))];
            expected.extend(
                clustering
                    .iter()
                    .map(|c| KeyComponent::Clustering(c.to_string())),
            );
            assert_eq!(key.full_key(), expected);
        }
    }

    #[test]
    fn test_to_cql() {
        let key = PrimaryKey::new(strings(&["a"]), vec![], Vec::<String>::new()).unwrap();
        insta::assert_snapshot!(key.to_string(), @"PRIMARY KEY (a)");

        let key = PrimaryKey::new(
            strings(&["tenant", "day"]),
            strings(&["ts", "id"]),
            ["ts".to_string()],
        )
        .unwrap();
        insta::assert_snapshot!(
            key.to_string(),
            @"PRIMARY KEY ((tenant, day), ts, id) WITH CLUSTERING ORDER BY (ts DESC, id ASC)"
        );
    }
}
