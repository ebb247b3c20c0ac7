use crate::config::{GatewayConfig, LoadedConfig};
use anyhow::{Context, Result};
use gitgate_content::{NormalizeOptions, SearchOptions};
use gitgate_diff::DiffLimits;
use gitgate_reference::ReferenceConfig;
use serde::{de, de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Defaults shared by every action of one process
pub struct CommandContext {
    config: GatewayConfig,
    config_path: Option<String>,
}

impl CommandContext {
    pub fn new(loaded: LoadedConfig) -> Self {
        Self {
            config: loaded.config,
            config_path: loaded.path.map(|path| path.display().to_string()),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    pub fn normalize_options(&self, requested: Option<&Value>) -> Result<NormalizeOptions> {
        overlay(&self.config.normalize, requested).context("Invalid normalize options")
    }

    pub fn search_options(&self, requested: Option<&Value>) -> Result<SearchOptions> {
        overlay(&self.config.search, requested).context("Invalid search options")
    }

    pub fn diff_limits(&self, requested: Option<&Value>) -> Result<DiffLimits> {
        overlay(&self.config.diff, requested).context("Invalid diff limits")
    }

    pub fn reference(&self) -> &ReferenceConfig {
        &self.config.reference
    }
}

/// Keys present in `requested` replace the configured ones; the rest keep
/// their configured values.
fn overlay<T: Serialize + DeserializeOwned>(base: &T, requested: Option<&Value>) -> Result<T> {
    let mut merged = serde_json::to_value(base)?;
    match (requested, &mut merged) {
        (None | Some(Value::Null), _) => {}
        (Some(Value::Object(keys)), Value::Object(fields)) => {
            for (key, value) in keys {
                fields.insert(key.clone(), value.clone());
            }
        }
        (Some(other), _) => {
            return Err(<serde_json::Error as de::Error>::custom(format!(
                "expected an object, got {other}"
            ))
            .into())
        }
    }
    Ok(serde_json::from_value(merged)?)
}
