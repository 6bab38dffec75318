//! Engine configuration.
//!
//! # Responsibility
//! - Hold every static knob of the classification engine.
//! - Load from TOML and apply environment overrides.
//!
//! # Invariants
//! - Missing TOML keys fall back to `EngineConfig::default()`.
//! - A config handed to the engine has passed `validate()`.

use crate::extract::DEFAULT_SUMMARY_MAX_CHARS;
use crate::model::classification::DEFAULT_CONFIDENCE_THRESHOLD;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const ENV_LLM_ENABLED: &str = "LLM_ENABLED";
pub const ENV_LLM_API_URL: &str = "LLM_API_URL";
pub const ENV_LLM_MODEL: &str = "LLM_MODEL";
pub const ENV_LLM_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";
pub const ENV_CONFIDENCE_THRESHOLD: &str = "CLASSIFY_CONFIDENCE_THRESHOLD";

/// Configuration loading/validation error.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read config: {err}"),
            Self::Parse(message) => write!(f, "cannot parse config: {message}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(_) | Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Static configuration of one engine instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// When `false`, classification never leaves the process.
    pub llm_enabled: bool,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// Results below this confidence need manual selection.
    pub confidence_threshold: f64,
    pub summary_max_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            llm_enabled: true,
            llm_api_url: "http://localhost:3001/v1/chat/completions".to_string(),
            llm_model: "Qwen/Qwen2-VL-7B-Instruct".to_string(),
            llm_timeout_secs: 30,
            llm_temperature: 0.3,
            llm_max_tokens: 200,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}

impl EngineConfig {
    /// Configuration that never contacts the remote classifier.
    pub fn offline() -> Self {
        Self {
            llm_enabled: false,
            ..Self::default()
        }
    }

    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, then re-validates.
    ///
    /// Blank values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        if let Some(raw) = value(ENV_LLM_ENABLED) {
            self.llm_enabled = parse_bool(ENV_LLM_ENABLED, &raw)?;
        }
        if let Some(raw) = value(ENV_LLM_API_URL) {
            self.llm_api_url = raw;
        }
        if let Some(raw) = value(ENV_LLM_MODEL) {
            self.llm_model = raw;
        }
        if let Some(raw) = value(ENV_LLM_TIMEOUT_SECS) {
            self.llm_timeout_secs = parse_number(ENV_LLM_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = value(ENV_CONFIDENCE_THRESHOLD) {
            self.confidence_threshold = parse_number(ENV_CONFIDENCE_THRESHOLD, &raw)?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::Invalid(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.summary_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "summary_max_chars must be positive".to_string(),
            ));
        }
        if self.llm_enabled {
            if self.llm_timeout_secs == 0 {
                return Err(ConfigError::Invalid(
                    "llm_timeout_secs must be positive".to_string(),
                ));
            }
            if self.llm_api_url.trim().is_empty() || self.llm_model.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "llm_api_url and llm_model are required when llm_enabled".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{key} expects a boolean, got `{other}`"
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::Invalid(format!("{key} expects a number, got `{raw}`")))
}
