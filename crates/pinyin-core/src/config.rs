//! Build configuration loaded from TOML, following the same embedded-default
//! pattern as the settings file of the engine.
//!
//! - `BuildConfig::default()` parses the embedded `default_build.toml`
//! - `parse_config_toml(toml_content)` parses and validates a custom file
//! - The config is immutable once built and is passed to the pipeline driver

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BUILD_TOML: &str = include_str!("default_build.toml");

/// Returns the embedded default build TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_BUILD_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildConfig {
    pub limits: LimitSettings,
    pub filter: FilterSettings,
    pub fetch: FetchSettings,
    pub sources: Vec<SourceSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitSettings {
    pub max_phrases_per_key: usize,
    pub max_keys: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterSettings {
    pub min_phrase_chars: usize,
    pub max_phrase_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchSettings {
    pub timeout_secs: u64,
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A named remote dictionary source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub url: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        parse_config_toml(DEFAULT_BUILD_TOML).expect("build TOML must be valid")
    }
}

pub fn parse_config_toml(toml_str: &str) -> Result<BuildConfig, ConfigError> {
    let config: BuildConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(c: &BuildConfig) -> Result<(), ConfigError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if c.$section.$field == 0 {
                return Err(ConfigError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(limits.max_phrases_per_key);
    check_positive!(limits.max_keys);
    check_positive!(filter.min_phrase_chars);
    check_positive!(fetch.timeout_secs);

    if c.filter.max_phrase_chars < c.filter.min_phrase_chars {
        return Err(ConfigError::InvalidValue {
            field: "filter.max_phrase_chars".to_string(),
            reason: "must be >= filter.min_phrase_chars".to_string(),
        });
    }

    if c.sources.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "sources".to_string(),
            reason: "at least one source is required".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, source) in c.sources.iter().enumerate() {
        if source.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("sources[{i}].name"),
                reason: "must not be empty".to_string(),
            });
        }
        if source.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("sources[{i}].url"),
                reason: "must not be empty".to_string(),
            });
        }
        if !seen.insert(source.name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: format!("sources[{i}].name"),
                reason: format!("duplicate source name '{}'", source.name),
            });
        }
    }

    Ok(())
}
