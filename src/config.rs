use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the text report handed to an external decision service is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Include the board map.
    pub include_board: bool,
    /// Print at most this many candidates; all of them if unset.
    pub max_candidates: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            include_board: true,
            max_candidates: None,
        }
    }
}

/// How an advised policy treats its advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Use the lowest-cost move when every reply was rejected, instead of failing the cycle.
    pub fallback_on_rejected_reply: bool,
    /// Times the advisor is asked in one cycle before giving up on it.
    pub max_consultations: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            fallback_on_rejected_reply: true,
            max_consultations: 1,
        }
    }
}

/// Top-level agent configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// `[report]` table.
    pub report: ReportConfig,
    /// `[policy]` table.
    pub policy: PolicyConfig,
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.max_consultations == 0 {
            return Err(ConfigError::Validation(
                "policy.max_consultations must be >= 1".into(),
            ));
        }
        if self.report.max_candidates == Some(0) {
            return Err(ConfigError::Validation(
                "report.max_candidates must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}
