use anyhow::{anyhow, Context, Result};
use gitgate_content::{NormalizeOptions, SearchOptions};
use gitgate_diff::DiffLimits;
use gitgate_reference::ReferenceConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "GITGATE_CONFIG";

/// Process-wide defaults; request payloads override them per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GatewayConfig {
    pub normalize: NormalizeOptions,
    pub search: SearchOptions,
    pub diff: DiffLimits,
    pub reference: ReferenceConfig,
}

/// Config plus the file it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: GatewayConfig,
    pub path: Option<PathBuf>,
}

impl GatewayConfig {
    /// Load from `explicit`, else from `$GITGATE_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        let Some(path) = path else {
            return Ok(LoadedConfig::default());
        };

        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_slice(&bytes)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());

        Ok(LoadedConfig {
            config,
            path: Some(path),
        })
    }

    /// Parse JSON, falling back to TOML, then validate.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
                let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                    anyhow!("config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
                })?;
                serde_json::to_value(toml_value)
                    .map_err(|err| anyhow!("Failed to convert TOML config to JSON: {err}"))?
            }
        };

        let config: Self =
            serde_json::from_value(value).map_err(|err| anyhow!("config parse error: {err}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.max_results == 0 {
            anyhow::bail!("config search.maxResults must be greater than zero");
        }
        self.diff.validate().context("config diff limits")?;
        self.reference.validate().context("config reference")?;
        Ok(())
    }
}
