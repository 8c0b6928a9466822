//! Configuration file handling for csm.
//!
//! Looks for `.config/csm.styx` in the current directory or any parent directory.
//! The file is optional; every setting has a default.

use facet::Facet;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Server used when neither `--server` nor the config file names one.
pub const DEFAULT_SERVER: &str = "127.0.0.1";

/// CQL native protocol port.
pub const DEFAULT_PORT: u16 = 9042;

/// Contents of `.config/csm.styx`.
#[derive(Facet, Debug, Default, Clone, PartialEq)]
pub struct Config {
    /// Server to retrieve schema from, as a host or `host:port`.
    #[facet(default)]
    pub server: Option<String>,

    /// Port appended to servers given without one.
    #[facet(default)]
    pub port: Option<u16>,
}

/// Load configuration from `.config/csm.styx`, searching up the directory tree.
///
/// Returns `None` when no config file exists.
pub fn load() -> Result<Option<(Config, PathBuf)>, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io(e.to_string()))?;
    match load_from(&cwd) {
        Ok(found) => Ok(Some(found)),
        Err(ConfigError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load configuration starting from a specific directory.
pub fn load_from(start: &Path) -> Result<(Config, PathBuf), ConfigError> {
    let config_path = find_config_file(start)?;
    let content =
        std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io(e.to_string()))?;

    let config: Config =
        facet_styx::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok((config, config_path))
}

/// Find `.config/csm.styx` by searching up the directory tree.
fn find_config_file(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".config/csm.styx");
        if config_path.is_file() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(ConfigError::NotFound);
        }
    }
}

/// Pick the server address: flag, then config, then [`DEFAULT_SERVER`].
pub fn resolve_server(flag: Option<&str>, config: Option<&Config>) -> String {
    let server = flag
        .or_else(|| config.and_then(|c| c.server.as_deref()))
        .unwrap_or(DEFAULT_SERVER);
    with_port(server, port(config))
}

/// Port from the config, or [`DEFAULT_PORT`].
pub fn port(config: Option<&Config>) -> u16 {
    config.and_then(|c| c.port).unwrap_or(DEFAULT_PORT)
}

/// Append `port` to a server address that has none.
pub fn with_port(server: &str, port: u16) -> String {
    if server.parse::<SocketAddr>().is_ok() {
        return server.to_string();
    }
    if let Ok(ip) = server.parse::<IpAddr>() {
        return SocketAddr::new(ip, port).to_string();
    }
    if let Some((host, explicit)) = server.rsplit_once(':')
        && !host.is_empty()
        && explicit.parse::<u16>().is_ok()
    {
        return server.to_string();
    }
    format!("{}:{}", server, port)
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No `.config/csm.styx` found in any parent directory
    NotFound,
    /// I/O error reading the file
    Io(String),
    /// Parse error in the Styx file
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound => {
                write!(
                    f,
                    "No .config/csm.styx found in current directory or any parent"
                )
            }
            ConfigError::Io(e) => write!(f, "Failed to read .config/csm.styx: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse .config/csm.styx: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
