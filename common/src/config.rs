use serde::Deserialize;
use std::{error::Error, fs};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CommonConfig {
    pub project_name: String,
    pub database_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceConfig {
    pub server_address: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct JanitorConfig {
    pub sleep_ms: u64,
    pub retention_days: i64,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub common: CommonConfig,
    pub service: ServiceConfig,
    pub janitor: JanitorConfig,
}

impl Config {
    pub fn load(config_path: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let contents = fs::read_to_string(config_path)?;
        let config = serde_yml::from_str(&contents)?;

        Ok(config)
    }
}
