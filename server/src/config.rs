use registration::{ErrorReporting, PipelineConfig};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_ADDR: &str = "127.0.0.1:3007";
const DEFAULT_AUDIT_LOG: &str = "registration_audit.log";

/// Startup configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("REGISTRATION_ADDR `{value}` is not a socket address")]
    InvalidAddr { value: String },
    #[error("REGISTRATION_ERROR_REPORTING: {0}")]
    InvalidReporting(String),
}

/// Server settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub audit_log: PathBuf,
    pub pipeline: PipelineConfig,
}

impl ServerConfig {
    /// Reads settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset or empty values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let addr_value = read("REGISTRATION_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = addr_value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr { value: addr_value.clone() })?;

        let audit_log = read("REGISTRATION_AUDIT_LOG")
            .map_or_else(|| PathBuf::from(DEFAULT_AUDIT_LOG), PathBuf::from);

        let reporting = match read("REGISTRATION_ERROR_REPORTING") {
            Some(value) => value.parse().map_err(ConfigError::InvalidReporting)?,
            None => ErrorReporting::default(),
        };

        Ok(Self {
            addr,
            audit_log,
            pipeline: PipelineConfig::new(reporting),
        })
    }
}
