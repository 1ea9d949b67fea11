//! Configuration handling for queuegen

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::GenError;

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Package every generated file is moved into
    #[serde(default = "default_target_package")]
    pub target_package: String,

    /// Generator name quoted in the generated-file notice
    #[serde(default = "default_generator_name")]
    pub generator_name: String,

    /// Module name quoted in the generated-file notice
    #[serde(default = "default_source_module")]
    pub source_module: String,
}

fn default_target_package() -> String {
    "org.jctools.queues.atomic".to_string()
}

fn default_generator_name() -> String {
    "queuegen_java::generator::AtomicQueueGenerator".to_string()
}

fn default_source_module() -> String {
    "jctools-build".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_package: default_target_package(),
            generator_name: default_generator_name(),
            source_module: default_source_module(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let content = fs::read_to_string(path).map_err(|e| GenError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|message| GenError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let config: GeneratorConfig = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.target_package.trim().is_empty() {
            return Err("target_package must not be empty".to_string());
        }
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, GenError> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::debug!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
