// ABOUTME: Configuration management for the formbind application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::ProcessConfig;
use crate::preprocess::PreprocessConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub process: ProcessConfig,

    #[serde(default)]
    pub preprocess: PreprocessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => Some(p),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                serde_yaml::from_str(&contents)?
            }
            _ => Config::default(),
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local = [
            PathBuf::from("formbind.yaml"),
            PathBuf::from("formbind.yml"),
            PathBuf::from(".formbind.yaml"),
        ];
        if let Some(path) = local.into_iter().find(|p| p.exists()) {
            return Some(path);
        }

        dirs::home_dir()
            .map(|home| home.join(".formbind").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply `FORMBIND_*` overrides read through `lookup`
    pub fn merge_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("FORMBIND_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FORMBIND_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Some(shell) = lookup("FORMBIND_SHELL") {
            self.process.shell = shell;
        }
        if let Some(timeout) = lookup("FORMBIND_PROCESS_TIMEOUT") {
            self.process.timeout_seconds = Some(timeout.parse()?);
        }

        if let Some(depth) = lookup("FORMBIND_MAX_INCLUDE_DEPTH") {
            self.preprocess.max_include_depth = depth.parse()?;
        }

        Ok(())
    }
}
