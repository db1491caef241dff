// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_SEARCH_DEPTH: u32 = 3;
pub const MAX_SEARCH_DEPTH: u32 = 6; // Beyond this the material-only search takes minutes per move

/// Settings for the computer player.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Plies searched per engine move.
    pub depth: u32,
    /// Seed for the fallback move picker. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { depth: DEFAULT_SEARCH_DEPTH, seed: None }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.depth) {
            return Err(ConfigError::InvalidDepth(self.depth));
        }
        Ok(())
    }
}

/// Session configuration. Built from defaults, then an optional JSON file, then CLI flags.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: EngineConfig,
}

impl Config {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Config::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_search_three_plies() {
        let config = Config::default();
        assert_eq!(config.engine.depth, 3);
        assert_eq!(config.engine.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "engine": { "seed": 42 } }"#).unwrap();
        assert_eq!(config.engine, EngineConfig { depth: 3, seed: Some(42) });
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn rejects_bad_depth_and_unknown_keys() {
        assert_matches!(Config::from_json(r#"{ "engine": { "depth": 0 } }"#), Err(ConfigError::InvalidDepth(0)));
        assert_matches!(Config::from_json(r#"{ "engine": { "depth": 9 } }"#), Err(ConfigError::InvalidDepth(9)));
        assert_matches!(Config::from_json(r#"{ "engin": {} }"#), Err(ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_matches!(err, ConfigError::Io { .. });
    }
}
