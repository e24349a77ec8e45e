use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use strum_macros::Display;
use thiserror::Error;

use crate::analysis::AnalysisOptions;
use crate::landmarks::{LandmarkCatalog, LandmarkSet};
use crate::telemetry::DEFAULT_GRID_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub sessions: SessionsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Course name to corner name to distance (m).
    #[serde(default)]
    pub landmarks: HashMap<String, LandmarkSet>,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    pub base_folder: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
        }
    }
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    pub key: String,
    pub name: String,
    pub permissions: HashSet<Permission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Permission {
    Compare,
    ListLandmarks,
    ViewPace,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        if config.analysis.grid_size == 0 {
            return Err(ConfigError::Invalid("analysis.grid_size must be positive".into()));
        }
        Ok(config)
    }

    pub fn find_api_key(&self, key: &str) -> Option<&ApiKey> {
        self.api_keys.iter().find(|k| k.key == key)
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            grid_size: self.analysis.grid_size,
        }
    }

    /// Built-in courses overlaid with the configured ones.
    pub fn landmark_catalog(&self) -> LandmarkCatalog {
        LandmarkCatalog::builtin().with_courses(self.landmarks.clone())
    }
}
