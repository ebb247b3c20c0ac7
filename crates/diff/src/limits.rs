use crate::error::{DiffError, Result};
use serde::{Deserialize, Serialize};

/// Cost bounds of one diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DiffLimits {
    /// Above this many lines on either side only a set-based summary is computed
    pub max_lcs_lines: usize,
    /// Ceiling on the LCS table size (`m * n`); beyond it every line counts as changed
    pub max_lcs_cells: usize,
    /// Changed lines listed in the result
    pub max_output_lines: usize,
}

impl Default for DiffLimits {
    fn default() -> Self {
        Self {
            max_lcs_lines: 500,
            max_lcs_cells: 250_000,
            max_output_lines: 200,
        }
    }
}

impl DiffLimits {
    pub fn validate(&self) -> Result<()> {
        if self.max_lcs_lines == 0 {
            return Err(DiffError::ZeroLimit("maxLcsLines"));
        }
        if self.max_lcs_cells == 0 {
            return Err(DiffError::ZeroLimit("maxLcsCells"));
        }
        if self.max_output_lines == 0 {
            return Err(DiffError::ZeroLimit("maxOutputLines"));
        }
        Ok(())
    }
}
