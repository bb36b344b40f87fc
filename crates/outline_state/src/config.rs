use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ObjectType;

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Name hints for objects created through "add object"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultNames {
    pub mesh: String,
    pub camera: String,
    pub light: String,
    pub group: String,
}

impl Default for DefaultNames {
    fn default() -> Self {
        Self {
            mesh: "New Mesh".to_string(),
            camera: "New Camera".to_string(),
            light: "New Light".to_string(),
            group: "New Group".to_string(),
        }
    }
}

impl DefaultNames {
    pub fn get(&self, kind: ObjectType) -> &str {
        match kind {
            ObjectType::Mesh => &self.mesh,
            ObjectType::Camera => &self.camera,
            ObjectType::Light => &self.light,
            ObjectType::Group => &self.group,
        }
    }
}

/// Outline session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,

    pub log_format: LogFormat,

    /// Zero-padded width of the numeric suffix used to disambiguate new names
    pub suffix_width: usize,

    pub default_names: DefaultNames,

    /// Start a session with the built-in sample scene
    pub load_sample_scene: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            suffix_width: crate::DEFAULT_SUFFIX_WIDTH,
            default_names: DefaultNames::default(),
            load_sample_scene: true,
        }
    }
}

impl FromStr for OutlineConfig {
    type Err = anyhow::Error;

    /// Accepts JSON or TOML; missing fields keep their defaults.
    fn from_str(text: &str) -> Result<Self> {
        let config: OutlineConfig = serde_json::from_str(text)
            .or_else(|_| toml::from_str(text))
            .context("Failed to parse outline config")?;
        config.validate()?;
        Ok(config)
    }
}

impl OutlineConfig {
    /// Name hint for a new object of `kind`
    pub fn name_hint(&self, kind: ObjectType) -> &str {
        self.default_names.get(kind)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.suffix_width) {
            bail!("suffix_width must be between 1 and 9, got {}", self.suffix_width);
        }

        if let Some(kind) = ObjectType::ALL
            .into_iter()
            .find(|kind| self.default_names.get(*kind).trim().is_empty())
        {
            bail!("default name for {} must not be blank", kind);
        }

        Ok(())
    }
}
