//! Table diffing - compare two column → type snapshots of the same table.
//!
//! Columns are matched by exact name only. A column that was renamed shows up
//! as one removal plus one addition.
//!
//! ```text
//! + created_at: timestamp
//! - legacy_id
//! ~ score: int -> bigint
//! ```
//!
//! Comparing whole keyspaces is not supported.

use crate::TableColumns;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Type of a column on both sides of a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Type in the first table.
    pub before: String,
    /// Type in the other table.
    pub after: String,
}

/// Differences between two versions of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    add: BTreeMap<String, String>,
    remove: BTreeSet<String>,
    change: BTreeMap<String, Change>,
}

impl Diff {
    /// Columns only in the first table, with their type.
    pub fn add(&self) -> &BTreeMap<String, String> {
        &self.add
    }

    /// Columns only in the other table.
    pub fn remove(&self) -> &BTreeSet<String> {
        &self.remove
    }

    /// Columns in both tables whose type differs.
    pub fn change(&self) -> &BTreeMap<String, Change> {
        &self.change
    }

    /// Returns true if there are no differences.
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.change.is_empty()
    }

    /// Count total number of differing columns.
    pub fn change_count(&self) -> usize {
        self.add.len() + self.remove.len() + self.change.len()
    }
}

/// Compare `table` against `other_table`.
///
/// - `add`: columns in `table` but not in `other_table`.
/// - `remove`: columns in `other_table` but not in `table`.
/// - `change`: columns in both with different types; `before` is the type in
///   `table`, `after` the type in `other_table`.
///
/// Neither input is modified.
pub fn table_diff(table: &TableColumns, other_table: &TableColumns) -> Diff {
    let columns: BTreeSet<&str> = table.keys().map(String::as_str).collect();
    let other_columns: BTreeSet<&str> = other_table.keys().map(String::as_str).collect();

    let add = columns
        .difference(&other_columns)
        .map(|column| (column.to_string(), table[*column].clone()))
        .collect();

    let remove = other_columns
        .difference(&columns)
        .map(|column| column.to_string())
        .collect();

    let change = columns
        .intersection(&other_columns)
        .filter_map(|column| {
            let before = &table[*column];
            let after = &other_table[*column];
            (before != after).then(|| {
                (
                    column.to_string(),
                    Change {
                        before: before.clone(),
                        after: after.clone(),
                    },
                )
            })
        })
        .collect();

    Diff {
        add,
        remove,
        change,
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No changes detected.");
        }

        let mut lines = Vec::with_capacity(self.change_count());
        for (column, cqltype) in &self.add {
            lines.push(format!("+ {}: {}", column, cqltype));
        }
        for column in &self.remove {
            lines.push(format!("- {}", column));
        }
        for (column, change) in &self.change {
            lines.push(format!("~ {}: {} -> {}", column, change.before, change.after));
        }
        write!(f, "{}", lines.join("\n"))
    }
}
