use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Schema(#[from] csm::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect to '{server}': {message}")]
    Connect { server: String, message: String },

    #[error("schema query on '{server}' failed: {message}")]
    Query { server: String, message: String },

    #[error("table {keyspace}.{table} not found on '{server}'")]
    TableNotFound {
        server: String,
        keyspace: String,
        table: String,
    },
}
