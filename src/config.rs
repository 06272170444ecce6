//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/arbor/arbor.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `ARBOR_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;

/// Output settings for reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Spaces per nesting level in listings
    pub indent: usize,
    /// Unit appended to sizes (e.g. "KB")
    pub size_unit: String,
    /// Decimal places for geometric results
    pub precision: usize,
    /// Show the boxed tree view in addition to the listing
    pub tree_style: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent: 2,
            size_unit: "KB".into(),
            precision: 2,
            tree_style: true,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub indent: Option<usize>,
    pub size_unit: Option<String>,
    pub precision: Option<usize>,
    pub tree_style: Option<bool>,
}

/// Get the XDG config directory for arbor.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "arbor").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("arbor.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// `None` when the variable is unset; a present but unparsable value is an error.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("ARBOR_{}: {}", key.to_uppercase(), e),
        }),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            indent: overlay.indent.unwrap_or(self.indent),
            size_unit: overlay
                .size_unit
                .clone()
                .unwrap_or_else(|| self.size_unit.clone()),
            precision: overlay.precision.unwrap_or(self.precision),
            tree_style: overlay.tree_style.unwrap_or(self.tree_style),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file given on the command line. Unlike the
    ///   global file, it must exist.
    #[instrument(level = "debug")]
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            debug!(path = %local_path.display(), "loading local config");
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply ARBOR_* environment variables as explicit overrides.
    ///
    /// A variable that is set but does not parse fails like invalid TOML.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ARBOR").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(&config, "indent")? {
            settings.indent = val;
        }
        if let Some(val) = env_value(&config, "size_unit")? {
            settings.size_unit = val;
        }
        if let Some(val) = env_value(&config, "precision")? {
            settings.precision = val;
        }
        if let Some(val) = env_value(&config, "tree_style")? {
            settings.tree_style = val;
        }

        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_with_overrides_only_specified() {
        let base = Settings::default();
        let overlay = RawSettings {
            precision: Some(4),
            ..Default::default()
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.precision, 4);
        assert_eq!(merged.indent, 2);
        assert_eq!(merged.size_unit, "KB");
    }

    #[test]
    fn test_to_toml_roundtrips_defaults() {
        let text = Settings::default().to_toml().unwrap();
        assert!(text.contains("size_unit = \"KB\""));
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
