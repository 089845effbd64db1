//! Session settings loaded from a TOML file
//!
//! Every section is optional:
//!
//! ```toml
//! [session]
//! seed_demo = true
//! max_sessions = 1024
//!
//! [graph]
//! label_max_chars = 120
//!
//! [responder]
//! prefix = "Response to: "
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::DEFAULT_PREFIX;

/// Root settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub graph: GraphSection,

    #[serde(default)]
    pub responder: ResponderSection,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.label_max_chars == Some(0) {
            return Err(ConfigError::Validation(
                "graph.label_max_chars must be at least 1".to_string(),
            ));
        }
        if self.session.max_sessions == 0 {
            return Err(ConfigError::Validation(
                "session.max_sessions must be at least 1".to_string(),
            ));
        }
        if self.responder.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "responder.prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The subset a session registry needs
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            seed_demo: self.session.seed_demo,
            max_sessions: self.session.max_sessions,
            label_max_chars: self.graph.label_max_chars,
        }
    }
}

/// New-session behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSection {
    /// Start every session with the demo tree
    #[serde(default = "default_true")]
    pub seed_demo: bool,

    /// Open sessions allowed at once; creation fails beyond this
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_sessions() -> usize {
    1024
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            seed_demo: true,
            max_sessions: default_max_sessions(),
        }
    }
}

/// Graph view settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSection {
    /// Cap on the turn text of each display line, `User: ` / `Assistant: `
    /// prefix not counted; unset shows full text
    #[serde(default)]
    pub label_max_chars: Option<usize>,
}

/// Placeholder reply settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderSection {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for ResponderSection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Settings consumed by the session registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub seed_demo: bool,
    pub max_sessions: usize,
    pub label_max_chars: Option<usize>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Settings::default().session_settings()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
