//! Loads and merges the YAML files of a config folder.

use super::{AppConfig, ConfigError};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FOLDER: &str = "config";

/// Files read from the config folder, in merge order.
pub const CONFIG_FILES: [&str; 2] = ["simulation.yml", "tennis.yml"];

/// How a later file is combined with what was loaded before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Nested mappings are merged key by key
    #[default]
    Deep,
    /// Top-level keys of the later file replace earlier ones wholesale
    Shallow,
}

/// Reads a config folder once and hands out the validated result.
#[derive(Debug)]
pub struct ConfigManager {
    folder: PathBuf,
    config: Option<AppConfig>,
}

impl ConfigManager {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            config: None,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Load every known file from the folder and merge them.
    ///
    /// Missing files are skipped with a warning. A YAML syntax error in any
    /// file fails the load, as does a folder where nothing could be read.
    pub fn load(&mut self, strategy: MergeStrategy) -> Result<&AppConfig, ConfigError> {
        let mut merged = Value::Mapping(Mapping::new());

        for file in CONFIG_FILES {
            let path = self.folder.join(file);
            if !path.exists() {
                tracing::warn!("config file not found: {}", path.display());
                continue;
            }

            let data = read_yaml(&path)?;
            tracing::info!("loaded config file {}", path.display());

            match strategy {
                MergeStrategy::Deep => deep_merge(&mut merged, data),
                MergeStrategy::Shallow => shallow_merge(&mut merged, data),
            }
        }

        if merged.as_mapping().map_or(true, Mapping::is_empty) {
            return Err(ConfigError::NothingLoaded(self.folder.clone()));
        }

        let config: AppConfig = serde_yaml::from_value(merged)?;
        tracing::debug!(?config, "configuration resolved");
        Ok(&*self.config.insert(config))
    }

    /// The loaded configuration.
    pub fn get(&self) -> Result<&AppConfig, ConfigError> {
        self.config.as_ref().ok_or(ConfigError::NotLoaded)
    }
}

fn read_yaml(path: &Path) -> Result<Value, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    // An empty file parses as null.
    Ok(match value {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    })
}

/// Recursively merge `update` into `base`; non-mapping values overwrite.
pub(crate) fn deep_merge(base: &mut Value, update: Value) {
    match (base, update) {
        (Value::Mapping(base_map), Value::Mapping(update_map)) => {
            for (key, value) in update_map {
                let nested =
                    value.is_mapping() && base_map.get(&key).is_some_and(Value::is_mapping);
                if nested {
                    if let Some(existing) = base_map.get_mut(&key) {
                        deep_merge(existing, value);
                    }
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base, update) => *base = update,
    }
}

/// Replace top-level keys of `base` with those of `update`.
pub(crate) fn shallow_merge(base: &mut Value, update: Value) {
    match (base, update) {
        (Value::Mapping(base_map), Value::Mapping(update_map)) => {
            for (key, value) in update_map {
                base_map.insert(key, value);
            }
        }
        (base, update) => *base = update,
    }
}
