//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use syllabus_extractor::ExtractorConfig;
use syllabus_llm::LlmConfig;
use syllabus_matcher::DEFAULT_THRESHOLD;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Matching settings
    #[serde(default)]
    pub matcher: MatcherSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Matching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherSettings {
    /// Minimum similarity for a match
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Directory holding output tables
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".syllabus").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Provider settings with the API key resolved.
    ///
    /// A key given on the command line (or via `OPENAI_API_KEY`) wins over
    /// the file.
    pub fn llm_with_key(&self, api_key: Option<&str>) -> Result<LlmConfig> {
        let mut llm = self.llm.clone();
        if let Some(key) = api_key {
            llm.api_key = key.to_string();
        }
        llm.validate().map_err(CliError::Config)?;
        Ok(llm)
    }

    /// Output directory, with a command-line override.
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.settings.output_dir.clone())
    }

    /// Copy suitable for display, with the API key masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.llm.api_key.is_empty() {
            copy.llm.api_key = "********".to_string();
        }
        copy
    }
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            output_dir: default_output_dir(),
        }
    }
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("tables")
}
