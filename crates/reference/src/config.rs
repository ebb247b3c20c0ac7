use crate::error::{ReferenceError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WEB_BASE: &str = "https://github.com";

/// Where permalinks point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ReferenceConfig {
    /// Web root of the GitHub host, e.g. `https://github.example.com` for
    /// an Enterprise install
    pub web_base: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            web_base: DEFAULT_WEB_BASE.to_string(),
        }
    }
}

impl ReferenceConfig {
    pub fn validate(&self) -> Result<()> {
        let host = self
            .web_base
            .strip_prefix("https://")
            .or_else(|| self.web_base.strip_prefix("http://"))
            .unwrap_or_default();
        if host.trim_end_matches('/').is_empty() {
            return Err(ReferenceError::InvalidWebBase(self.web_base.clone()));
        }
        Ok(())
    }

    /// `web_base` without trailing slashes
    pub fn base(&self) -> &str {
        self.web_base.trim_end_matches('/')
    }
}
