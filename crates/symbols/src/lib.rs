//! # Gitgate Symbols
//!
//! Heuristic symbol and import discovery for files fetched over the network,
//! where no compiler toolchain is available.
//!
//! ## Approach
//!
//! Extraction is regex-based and line-oriented, never an AST:
//!
//! ```text
//! file path ──> Language key (extension table)
//!                   │
//! content ──> normalize ──> PatternTable[language]
//!                   │            ├─ symbol patterns  → Symbol { name, type, line }
//!                   │            └─ import patterns  → ImportRecord { module, symbols, line }
//!                   │
//!                   └──> LineIndex: byte offset of the capture → 1-based line
//! ```
//!
//! Pattern tables are data ([`PatternTable`]); the builtin table covers six
//! language keys and custom tables can be compiled from
//! [`LanguagePatternSpecs`].
//!
//! ## Example
//!
//! ```rust
//! use gitgate_symbols::{find_symbols, SymbolQuery};
//!
//! let code = "// comment\n\nfunction foo() {\n  return 1;\n}\n";
//! let symbols = find_symbols(code, "app.js", &SymbolQuery::default());
//! assert_eq!(symbols[0].name, "foo");
//! assert_eq!(symbols[0].line_number, 3);
//! ```

mod builtin;
mod error;
mod extract;
mod imports;
mod language;
mod patterns;
mod references;
mod types;

pub use error::{Result, SymbolsError};
pub use extract::{is_exported, SymbolQuery};
pub use language::{detect_language, Language};
pub use patterns::{
    ImportPattern, ImportPatternSpec, LanguagePatternSpecs, LanguagePatterns, PatternTable,
    SymbolListStyle, SymbolPattern, SymbolPatternSpec,
};
pub use types::{
    is_relative_module, ImportRecord, ImportType, Reference, ReferenceKind, Symbol, SymbolType,
};

/// [`PatternTable::find_symbols`] over the builtin table
pub fn find_symbols(content: &str, file_path: &str, query: &SymbolQuery) -> Vec<Symbol> {
    PatternTable::builtin().find_symbols(content, file_path, query)
}

/// [`PatternTable::parse_imports`] over the builtin table
pub fn parse_imports(content: &str, file_path: &str, language: Option<Language>) -> Vec<ImportRecord> {
    PatternTable::builtin().parse_imports(content, file_path, language)
}

/// [`PatternTable::find_exports`] over the builtin table
pub fn find_exports(content: &str, file_path: &str, language: Option<Language>) -> Vec<Symbol> {
    PatternTable::builtin().find_exports(content, file_path, language)
}

/// [`PatternTable::find_references`] over the builtin table
pub fn find_references(
    content: &str,
    symbol_name: &str,
    file_path: &str,
    context_lines: usize,
) -> Vec<Reference> {
    PatternTable::builtin().find_references(content, symbol_name, file_path, context_lines)
}
