//! Configuration file support for notion2md CLI
//!
//! Loads settings from `_notion2md.toml` configuration file.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_notion2md.toml";

/// Schema file referenced from generated configs (write it with `notion2md init --schema`)
pub const SCHEMA_FILE_NAME: &str = "notion2md.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Input file configuration
    #[serde(skip_serializing_if = "InputConfig::is_empty")]
    pub input: InputConfig,
    /// Output file configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// Batch processing configuration
    #[serde(skip_serializing_if = "BatchConfig::is_empty")]
    pub batch: BatchConfig,
}

/// Input file configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct InputConfig {
    /// Directory prefix stripped from export paths when deriving output paths (default: "_raw")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Extension of export files; other entries in the changed list are ignored (default: "json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl InputConfig {
    fn is_empty(&self) -> bool {
        self.root.is_none() && self.extension.is_none()
    }
}

/// Output file configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that output paths are placed under (default: working directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Extension for generated Markdown files (default: "md")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Start each file with the auto-generated notice (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<bool>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.dir.is_none() && self.extension.is_none() && self.notice.is_none()
    }
}

/// Batch processing configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of parallel jobs (default: sequential; 0 uses all CPUs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl BatchConfig {
    fn is_empty(&self) -> bool {
        self.jobs.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_notion2md.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema ./{}\n\n{}", SCHEMA_FILE_NAME, toml_content))
    }

    /// Create a sample configuration with the built-in defaults for init command
    pub fn sample() -> Self {
        Config {
            input: InputConfig {
                root: Some(PathBuf::from("_raw")),
                extension: Some("json".to_string()),
            },
            output: OutputConfig {
                dir: None, // working directory
                extension: Some("md".to_string()),
                notice: Some(true),
            },
            batch: BatchConfig {
                jobs: None, // sequential
            },
        }
    }
}
