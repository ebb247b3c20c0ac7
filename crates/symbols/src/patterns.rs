//! Pattern tables: the per-language regex data that drives extraction.
//!
//! Tables are plain data. Adding a language means adding a
//! [`LanguagePatterns`] entry, never touching the extraction code.

use crate::builtin;
use crate::error::{Result, SymbolsError};
use crate::language::Language;
use crate::types::{ImportType, SymbolType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static BUILTIN: Lazy<PatternTable> = Lazy::new(|| {
    // compiled by test_builtin_covers_every_language
    PatternTable::from_specs(builtin::table_specs()).expect("builtin pattern tables compile")
});

/// How the symbol list of an import is read out of its captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolListStyle {
    /// No symbols recorded
    #[default]
    None,
    /// ES import clause: `Default, { a, b as c }` or `* as ns`
    JsClause,
    /// CommonJS binding: `{ a, b: c }` or `name`
    JsBinding,
    /// Comma separated names, optional parentheses, `as` aliases stripped
    CommaList,
    /// Capture holds several modules (`import a, b as c`); one record each
    ModuleList,
    /// Rust use tree, the capture is split into module and names
    RustUseTree,
    /// Last dotted segment of the module (`java.util.List` → `List`)
    LastSegment,
}

/// Serializable description of a symbol pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolPatternSpec {
    pub pattern: String,
    #[serde(rename = "type")]
    pub kind: SymbolType,
    #[serde(default = "default_group")]
    pub name_group: usize,
    /// Captured names to ignore (keywords the pattern can trip over)
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Serializable description of an import pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPatternSpec {
    pub pattern: String,
    #[serde(rename = "type")]
    pub kind: ImportType,
    #[serde(default = "default_group")]
    pub module_group: usize,
    #[serde(default)]
    pub symbols_group: Option<usize>,
    #[serde(default)]
    pub symbol_style: SymbolListStyle,
    /// When set, `module_group` captures a block that is scanned again with
    /// this pattern; its group 1 is the module of each entry.
    #[serde(default)]
    pub inner_pattern: Option<String>,
}

fn default_group() -> usize {
    1
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguagePatternSpecs {
    #[serde(default)]
    pub symbols: Vec<SymbolPatternSpec>,
    #[serde(default)]
    pub imports: Vec<ImportPatternSpec>,
}

#[derive(Debug, Clone)]
pub struct SymbolPattern {
    pub regex: Regex,
    pub kind: SymbolType,
    pub name_group: usize,
    pub exclude: Vec<String>,
}

impl SymbolPattern {
    pub fn excludes(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }
}

#[derive(Debug, Clone)]
pub struct ImportPattern {
    pub regex: Regex,
    pub kind: ImportType,
    pub module_group: usize,
    pub symbols_group: Option<usize>,
    pub symbol_style: SymbolListStyle,
    pub inner: Option<Regex>,
}

/// Ordered symbol and import patterns for one language key
#[derive(Debug, Clone, Default)]
pub struct LanguagePatterns {
    pub symbols: Vec<SymbolPattern>,
    pub imports: Vec<ImportPattern>,
}

impl LanguagePatterns {
    pub fn compile(specs: &LanguagePatternSpecs) -> Result<Self> {
        let symbols = specs
            .symbols
            .iter()
            .map(|spec| {
                let regex = compile(&spec.pattern, spec.name_group)?;
                Ok(SymbolPattern {
                    regex,
                    kind: spec.kind,
                    name_group: spec.name_group,
                    exclude: spec.exclude.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let imports = specs
            .imports
            .iter()
            .map(|spec| {
                let group = spec.symbols_group.unwrap_or(0).max(spec.module_group);
                let regex = compile(&spec.pattern, group)?;
                let inner = spec
                    .inner_pattern
                    .as_deref()
                    .map(|inner| compile(inner, 1))
                    .transpose()?;
                Ok(ImportPattern {
                    regex,
                    kind: spec.kind,
                    module_group: spec.module_group,
                    symbols_group: spec.symbols_group,
                    symbol_style: spec.symbol_style,
                    inner,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { symbols, imports })
    }
}

fn compile(pattern: &str, required_group: usize) -> Result<Regex> {
    let regex = Regex::new(pattern).map_err(|source| SymbolsError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    // captures_len counts group 0
    if regex.captures_len() <= required_group {
        return Err(SymbolsError::MissingGroup {
            pattern: pattern.to_string(),
            group: required_group,
        });
    }
    Ok(regex)
}

/// Mapping from language key to its ordered pattern lists
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    languages: HashMap<Language, LanguagePatterns>,
}

impl PatternTable {
    /// The process-wide builtin table
    pub fn builtin() -> &'static PatternTable {
        &BUILTIN
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile a whole table from specs
    pub fn from_specs(specs: HashMap<Language, LanguagePatternSpecs>) -> Result<Self> {
        let mut table = Self::empty();
        for (language, spec) in specs {
            table.languages.insert(language, LanguagePatterns::compile(&spec)?);
        }
        Ok(table)
    }

    /// Add or replace the patterns of one language
    pub fn with_language(mut self, language: Language, patterns: LanguagePatterns) -> Self {
        self.languages.insert(language, patterns);
        self
    }

    pub fn get(&self, language: Language) -> Option<&LanguagePatterns> {
        self.languages.get(&language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_language() {
        let table = PatternTable::builtin();
        for lang in Language::ALL {
            let patterns = table.get(lang).expect("language present");
            assert!(!patterns.symbols.is_empty(), "{lang} has symbol patterns");
            assert!(!patterns.imports.is_empty(), "{lang} has import patterns");
        }
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        let specs = LanguagePatternSpecs {
            symbols: vec![SymbolPatternSpec {
                pattern: "(unclosed".to_string(),
                kind: SymbolType::Function,
                name_group: 1,
                exclude: vec![],
            }],
            imports: vec![],
        };
        assert!(matches!(
            LanguagePatterns::compile(&specs),
            Err(SymbolsError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_missing_group_is_rejected() {
        let specs = LanguagePatternSpecs {
            symbols: vec![SymbolPatternSpec {
                pattern: r"fn \w+".to_string(),
                kind: SymbolType::Function,
                name_group: 1,
                exclude: vec![],
            }],
            imports: vec![],
        };
        assert!(matches!(
            LanguagePatterns::compile(&specs),
            Err(SymbolsError::MissingGroup { group: 1, .. })
        ));
    }

    #[test]
    fn test_specs_deserialize_with_defaults() {
        let json = r#"{
            "symbols": [{"pattern": "(?m)^proc\\s+(\\w+)", "type": "function"}],
            "imports": [{"pattern": "(?m)^use\\s+(\\S+)", "type": "use"}]
        }"#;
        let specs: LanguagePatternSpecs = serde_json::from_str(json).unwrap();
        assert_eq!(specs.symbols[0].name_group, 1);
        assert_eq!(specs.imports[0].symbol_style, SymbolListStyle::None);
        assert!(LanguagePatterns::compile(&specs).is_ok());
    }
}
