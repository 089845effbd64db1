//! Application configuration

pub mod settings;

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use settings::{ConfigError, SessionSettings, Settings};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Optional TOML settings file
    pub settings_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            settings_path: env::var("BRANCH_CHAT_CONFIG").ok().map(PathBuf::from),
        })
    }

    /// Read the settings file, or fall back to defaults when none is set
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        match &self.settings_path {
            Some(path) => Settings::from_file(path),
            None => Ok(Settings::default()),
        }
    }
}
