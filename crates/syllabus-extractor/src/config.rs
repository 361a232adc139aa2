//! Configuration for the Extractor

use crate::protocol::{CONTINUATION_MARKER, DELIMITER, NULL_TOKEN};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 4000;

/// Default stop signal
pub const DEFAULT_STOP_SIGNAL: &str = "TASK_COMPLETE";

/// What to do when a single chunk's model call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure, treat the chunk as having produced nothing, continue
    #[default]
    SkipChunk,
    /// Stop the run and return the failure
    Abort,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Chunk size (characters)
    pub chunk_size: usize,

    /// Reply that ends the session early
    pub stop_signal: String,

    /// Per-chunk failure handling
    pub failure_policy: FailurePolicy,

    /// Maximum time for a single model call (seconds)
    pub chunk_timeout_secs: u64,

    /// Maximum document length (characters)
    pub max_text_length: usize,

    /// Skip emitting objectives that are blank after trimming
    pub drop_blank_objectives: bool,
}

impl ExtractorConfig {
    /// Per-chunk timeout as a Duration
    pub fn chunk_timeout(&self) -> Duration {
        Duration::from_secs(self.chunk_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.chunk_timeout_secs == 0 {
            return Err("chunk_timeout_secs must be greater than 0".to_string());
        }
        let stop = self.stop_signal.trim();
        if stop.is_empty() {
            return Err("stop_signal must not be empty".to_string());
        }
        if stop != self.stop_signal {
            return Err("stop_signal must not have surrounding whitespace".to_string());
        }
        if stop == NULL_TOKEN || stop.contains(DELIMITER) || stop.ends_with(CONTINUATION_MARKER) {
            return Err(format!("stop_signal '{}' collides with a reserved token", stop));
        }
        Ok(())
    }

    /// Strict preset: abort the run on the first failed chunk
    pub fn strict() -> Self {
        Self {
            failure_policy: FailurePolicy::Abort,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            stop_signal: DEFAULT_STOP_SIGNAL.to_string(),
            failure_policy: FailurePolicy::SkipChunk,
            chunk_timeout_secs: 300,
            max_text_length: 2_000_000,
            drop_blank_objectives: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 4000);
        assert_eq!(config.stop_signal, "TASK_COMPLETE");
        assert_eq!(config.failure_policy, FailurePolicy::SkipChunk);
    }

    #[test]
    fn test_strict_config_is_valid() {
        let config = ExtractorConfig::strict();
        assert!(config.validate().is_ok());
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_invalid_chunk_size() {
        let mut config = ExtractorConfig::default();
        config.chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reserved_stop_signals_rejected() {
        for bad in ["", "NULL", "DONE|NOW", "ENDCONCATNEXT", " DONE"] {
            let mut config = ExtractorConfig::default();
            config.stop_signal = bad.to_string();
            assert!(config.validate().is_err(), "'{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("chunk_size = 1000\nfailure_policy = \"abort\"").unwrap();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.stop_signal, DEFAULT_STOP_SIGNAL);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
