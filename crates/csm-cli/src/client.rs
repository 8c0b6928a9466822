//! Fetching column metadata from a live node.
//!
//! Reads `system.schema_columns`, which exists on Cassandra 2.x nodes.

use crate::error::CliError;
use csm::{KeyRole, SchemaColumnRow};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use tracing::{debug, info};

const SCHEMA_COLUMNS_QUERY: &str = "SELECT keyspace_name, columnfamily_name, column_name, \
     validator, type, component_index FROM system.schema_columns";

/// Column order of [`SCHEMA_COLUMNS_QUERY`].
type RawRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    Option<i32>,
);

/// Connect to `server` (`host:port`) and fetch every column row.
pub async fn fetch_schema_columns(server: &str) -> Result<Vec<SchemaColumnRow>, CliError> {
    info!(server, "getting schema columns from server");

    let session: Session = SessionBuilder::new()
        .known_node(server)
        .build()
        .await
        .map_err(|e| CliError::Connect {
            server: server.to_string(),
            message: e.to_string(),
        })?;

    let result = session
        .query_unpaged(SCHEMA_COLUMNS_QUERY, ())
        .await
        .map_err(|e| query_error(server, e))?;
    let result = result.into_rows_result().map_err(|e| query_error(server, e))?;

    let mut rows = Vec::new();
    for raw in result.rows::<RawRow>().map_err(|e| query_error(server, e))? {
        let raw = raw.map_err(|e| query_error(server, e))?;
        rows.push(row_from_raw(raw));
    }

    info!(server, rows = rows.len(), "fetched schema columns");
    Ok(rows)
}

fn query_error(server: &str, error: impl std::fmt::Display) -> CliError {
    CliError::Query {
        server: server.to_string(),
        message: error.to_string(),
    }
}

fn row_from_raw(raw: RawRow) -> SchemaColumnRow {
    let (keyspace_name, columnfamily_name, column_name, validator, ty, component_index) = raw;
    let kind = ty.as_deref().map(KeyRole::from_type).unwrap_or_default();
    let component_index = component_index.and_then(|i| u32::try_from(i).ok());
    debug!(
        keyspace = %keyspace_name,
        table = %columnfamily_name,
        column = %column_name,
        ?kind,
        "schema column"
    );

    SchemaColumnRow {
        keyspace_name,
        columnfamily_name,
        column_name,
        validator,
        kind,
        component_index,
    }
}

/// Keep only the rows of one table.
pub fn table_rows(
    rows: &[SchemaColumnRow],
    keyspace: &str,
    table: &str,
) -> Vec<SchemaColumnRow> {
    rows.iter()
        .filter(|r| r.belongs_to(keyspace, table))
        .cloned()
        .collect()
}
