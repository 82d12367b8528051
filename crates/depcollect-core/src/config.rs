use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use depcollect_util::errors::{DepcollectError, DepcollectResult};

/// Optional run configuration loaded from a TOML file passed with `--config`.
///
/// Every field is optional; command-line flags and environment variables take
/// precedence over values found here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectConfig {
    #[serde(default)]
    pub source: Option<PathBuf>,

    #[serde(default)]
    pub dest: Option<PathBuf>,

    #[serde(default)]
    pub root: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub manifest: Option<String>,

    #[serde(default)]
    pub jobs: Option<usize>,
}

impl CollectConfig {
    /// Load a configuration file. A missing or malformed file is an error.
    pub fn from_path(path: &Path) -> DepcollectResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DepcollectError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let config = Self::from_str(&content).map_err(|e| DepcollectError::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.jobs == Some(0) {
            return Err("`jobs` must be at least 1".to_string());
        }
        Ok(config)
    }
}
