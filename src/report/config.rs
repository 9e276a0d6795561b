//! Report configuration loaded from YAML

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::data::AnnotationLayer;
use crate::report::constants::*;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub file_suffix: String,
    pub top_n: usize,
    pub layers: Vec<AnnotationLayer>,
    pub show_sentences: usize,
    pub show_tokens: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            top_n: DEFAULT_TOP_N,
            layers: AnnotationLayer::ALL.to_vec(),
            show_sentences: DEFAULT_SHOW_SENTENCES,
            show_tokens: DEFAULT_SHOW_TOKENS,
        }
    }
}

impl ReportConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }

        let yaml_str = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        Self::from_yaml_str(&yaml_str)
            .map_err(|e| anyhow!("Invalid YAML config in {}: {}", path.display(), e))
    }

    pub fn from_yaml_str(yaml_str: &str) -> Result<Self> {
        if yaml_str.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ReportConfig = serde_yaml::from_str(yaml_str)?;
        config.validate()?;
        log::debug!("Report config: {:?}", config);
        Ok(config)
    }

    /// Replace the file suffix, e.g. from a command-line flag
    pub fn with_suffix(mut self, suffix: Option<String>) -> Result<Self> {
        if let Some(suffix) = suffix {
            self.file_suffix = suffix;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_suffix.is_empty() {
            return Err(anyhow!("file_suffix must not be empty"));
        }
        Ok(())
    }
}
