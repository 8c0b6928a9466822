use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The base of a validator is not part of the type vocabulary.
    #[error("invalid cql validator: '{validator}'")]
    InvalidValidator { validator: String },

    /// A collection or reversed validator is missing its parameters, or has
    /// the wrong number of them.
    #[error("incomplete validator, expected parameters: '{validator}'")]
    IncompleteValidator { validator: String },

    /// Primary key rows span more than one `(keyspace, table)` pair.
    #[error("the rows supplied represent more than one table: {}", format_tables(.tables))]
    MultiTableInput {
        tables: BTreeSet<(String, String)>,
    },

    #[error("primary key must have a non empty partition key")]
    EmptyPartitionKey,
}

impl Error {
    pub(crate) fn invalid(validator: &str) -> Self {
        Error::InvalidValidator {
            validator: validator.to_string(),
        }
    }

    pub(crate) fn incomplete(validator: &str) -> Self {
        Error::IncompleteValidator {
            validator: validator.to_string(),
        }
    }
}

fn format_tables(tables: &BTreeSet<(String, String)>) -> String {
    let names: Vec<String> = tables
        .iter()
        .map(|(keyspace, table)| format!("{}.{}", keyspace, table))
        .collect();
    names.join(", ")
}
