//! Ordering and logging settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::models::DEFAULT_STEP;
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// Smallest step that still leaves an integer between renumbered neighbours
pub const MIN_STEP: u64 = 2;

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderSettings {
    /// Spacing between positions after a renumber, and the append increment
    pub step: u64,
    /// Logging configuration
    pub logging: LoggingSettings,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            logging: LoggingSettings::default(),
        }
    }
}

impl OrderSettings {
    /// Parses and validates settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for unusable values.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the settings can be used
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `step` is below [`MIN_STEP`].
    pub fn validate(&self) -> ConfigResult<()> {
        if self.step < MIN_STEP {
            return Err(ConfigError::Validation {
                field: "step".to_string(),
                reason: format!(
                    "must be at least {MIN_STEP} so renumbered neighbours leave a gap, got {}",
                    self.step
                ),
            });
        }
        Ok(())
    }
}

/// Logging section of the settings file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Minimum level written
    pub level: TracingLevel,
    /// Log file; stderr when unset
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// Builds the tracing configuration for these settings
    #[must_use]
    pub fn to_tracing_config(&self) -> TracingConfig {
        let output = self
            .file
            .as_ref()
            .map_or(TracingOutput::Stderr, |path| TracingOutput::File {
                path: path.clone(),
            });
        TracingConfig::new().with_level(self.level).with_output(output)
    }
}

/// Loads settings from a TOML file
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
/// errors of [`OrderSettings::from_toml_str`].
pub fn load_settings(path: &Path) -> ConfigResult<OrderSettings> {
    let content = std::fs::read_to_string(path)?;
    let settings = OrderSettings::from_toml_str(&content)?;
    tracing::debug!(path = %path.display(), step = settings.step, "Settings loaded");
    Ok(settings)
}
