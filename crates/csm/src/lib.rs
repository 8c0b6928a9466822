//! Cassandra schema metadata interpretation.
//!
//! Cassandra describes every column of every table in `system.schema_columns`,
//! one row per column, with the column's storage type encoded as a marshal
//! class name (its *validator*). This crate turns those rows back into
//! something readable:
//!
//! - [`parse_validator`] resolves a validator to a CQL type such as
//!   `map<int,text>` and tells whether it was wrapped in `ReversedType`
//! - [`PrimaryKey::reconstruct`] rebuilds a table's partition key, clustering
//!   key and clustering order
//! - [`SchemaTree::build`] groups all columns by keyspace and table
//! - [`table_diff`] compares two column → type snapshots of a table
//!
//! Fetching the rows is up to the caller; everything here is pure and does no
//! I/O.
//!
//! ```ignore
//! let rows: Vec<csm::SchemaColumnRow> = fetch_rows_from_node()?;
//! let tree = csm::SchemaTree::build(&rows)?;
//! let users: Vec<_> = rows.iter().filter(|r| r.belongs_to("app", "users")).collect();
//! let key = csm::PrimaryKey::reconstruct(users)?;
//! println!("{}", key);
//! ```

mod diff;
mod error;
mod primary_key;
mod row;
mod tree;
mod validator;
pub mod vocabulary;

pub use diff::{Change, Diff, table_diff};
pub use error::Error;
pub use primary_key::{KeyComponent, PrimaryKey, SortOrder};
pub use row::{KeyRole, SchemaColumnRow};
pub use tree::{KeyspaceTables, SchemaTree, TableColumns};
pub use validator::{CqlType, ParsedValidator, parse_validator};
pub use vocabulary::{Collection, Primitive};

/// Result type for csm operations.
pub type Result<T> = std::result::Result<T, Error>;
