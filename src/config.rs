use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Invalid(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub port: u16,

    #[serde(default = "default_data_api_url")]
    pub data_api_url: String,

    #[serde(default)]
    pub data_api_password: String,
}

fn default_data_api_url() -> String {
    "http://localhost:4444".to_string()
}

impl Config {
    /// Loads the JSON config file. A minimal `{"port": 8080}` is enough;
    /// the data-API fields fall back to local defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
