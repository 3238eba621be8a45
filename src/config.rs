use crate::merge::{ArrayHandling, MergeSettings, NullValueHandling, PropertyNameComparison};
use crate::{MergeError, MergeResult};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of `config.toml`.
///
/// ```toml
/// [merge]
/// array-handling = "union"
/// null-value-handling = "merge"
/// property-name-comparison = "case-insensitive"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MergeConfig {
    pub merge: MergeSettings,
}

// Policy names go through `FromStr`, so an unknown one is an
// `InvalidConfiguration` error rather than a serde message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    merge: RawMergeTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawMergeTable {
    array_handling: Option<String>,
    null_value_handling: Option<String>,
    property_name_comparison: Option<String>,
}

impl TryFrom<RawMergeTable> for MergeSettings {
    type Error = MergeError;

    fn try_from(raw: RawMergeTable) -> MergeResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            array_handling: raw
                .array_handling
                .as_deref()
                .map_or(Ok(defaults.array_handling), str::parse::<ArrayHandling>)?,
            null_value_handling: raw
                .null_value_handling
                .as_deref()
                .map_or(Ok(defaults.null_value_handling), str::parse::<NullValueHandling>)?,
            property_name_comparison: raw.property_name_comparison.as_deref().map_or(
                Ok(defaults.property_name_comparison),
                str::parse::<PropertyNameComparison>,
            )?,
        })
    }
}

impl MergeConfig {
    /// Load the merge configuration from the default path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Unable to determine the config directory
    /// - Unable to read the config file (other than it not existing)
    /// - The config file contains invalid TOML or an unknown policy name
    pub fn load() -> Result<Option<Self>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!("No merge configuration found at {}", config_path.display());
            return Ok(None);
        }

        Self::load_from(&config_path).map(Some)
    }

    /// Load the merge configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe valid
    /// merge settings.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid merge config at {}", path.display()))?;

        debug!("Loaded merge settings from {}: {}", path.display(), config.merge);
        Ok(config)
    }

    /// Parse configuration text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML, unknown keys, or unknown policy
    /// names.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content).context("Failed to parse TOML config")?;
        let merge = MergeSettings::try_from(raw.merge)?;
        Ok(Self { merge })
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize merge config")
    }

    /// Get the path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if unable to determine the config directory
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
            Ok(PathBuf::from(config_home).join("jsonmerge").join("config.toml"))
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "jsonmerge") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            anyhow::bail!("Could not determine config directory")
        }
    }

    /// Settings from the default config file, or the defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be loaded.
    pub fn settings_or_default() -> Result<MergeSettings> {
        Ok(Self::load()?.map(|config| config.merge).unwrap_or_default())
    }
}
