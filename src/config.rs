use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Keys every config file must define, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 6] = ["account", "user", "warehouse", "database", "schema", "role"];

/// Value shipped in `config.template.json`.
pub const PLACEHOLDER_ACCOUNT: &str = "YOUR_ACCOUNT_IDENTIFIER";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("Error loading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON in config file: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Config file must contain a JSON object")]
    NotAnObject,
    #[error("Missing required fields in config.json: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid value in config file: {0}")]
    InvalidField(#[source] serde_json::Error),
    #[error("Please update the 'account' value in config.json")]
    PlaceholderAccount,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub account: String,
    pub user: String,
    pub warehouse: String,
    pub database: String,
    pub schema: String,
    pub role: String,

    /// Base URL override, e.g. for private link endpoints.
    #[serde(default)]
    pub host: Option<String>,
}

impl Config {

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        log::debug!("Read config from {}", path.display());
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(ConfigError::InvalidJson)?;

        let object = value.as_object().ok_or(ConfigError::NotAnObject)?;
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .into_iter()
            .filter(|field| !object.contains_key(*field))
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingFields(missing));
        }

        serde_json::from_value(value).map_err(ConfigError::InvalidField)
    }

    /// Fails while `account` still holds the template placeholder.
    pub fn ensure_configured(&self) -> Result<(), ConfigError> {
        if self.account == PLACEHOLDER_ACCOUNT {
            return Err(ConfigError::PlaceholderAccount);
        }
        Ok(())
    }

}
