use gitgate_content::ContextLine;
use serde::{Deserialize, Serialize};

/// Kind of a discovered definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolType {
    Function,
    Class,
    Method,
    Interface,
    Type,
    Enum,
    Struct,
    Trait,
    Impl,
    Module,
    ConstFn,
    Macro,
}

impl SymbolType {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolType::Function => "function",
            SymbolType::Class => "class",
            SymbolType::Method => "method",
            SymbolType::Interface => "interface",
            SymbolType::Type => "type",
            SymbolType::Enum => "enum",
            SymbolType::Struct => "struct",
            SymbolType::Trait => "trait",
            SymbolType::Impl => "impl",
            SymbolType::Module => "module",
            SymbolType::ConstFn => "const_fn",
            SymbolType::Macro => "macro",
        }
    }
}

/// Symbol definition found by pattern matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SymbolType,
    pub line_number: usize,
    /// Full source line holding the name
    pub text: String,
}

/// Import syntax variant that produced an [`ImportRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportType {
    /// `import x from 'y'`, `import a.b`, `import java.util.List;`
    Import,
    /// `import 'polyfill'`
    SideEffect,
    /// `export { a } from './b'`
    ExportFrom,
    /// `require('x')`
    Require,
    /// `import('x')`
    DynamicImport,
    /// `from pkg import name`
    FromImport,
    /// entry of a Go `import ( ... )` block
    ImportGroup,
    /// Rust `use`
    Use,
    ExternCrate,
    /// C# `using`
    Using,
    RequireRelative,
}

/// Import statement found by pattern matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Raw module path / string as written
    pub module: String,
    /// Imported names (aliases stripped), may be empty
    pub symbols: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ImportType,
    pub line_number: usize,
    /// Statement text (may span lines)
    pub text: String,
    pub is_relative: bool,
}

impl ImportRecord {
    /// Last line covered by the statement
    pub fn end_line(&self) -> usize {
        self.line_number + self.text.matches('\n').count()
    }

    /// Whether `name` appears in the symbol list or the module path
    pub fn mentions(&self, name: &str) -> bool {
        self.symbols.iter().any(|s| s == name) || self.module.contains(name)
    }
}

/// `true` iff the module path begins with `.` or `/`
pub fn is_relative_module(module: &str) -> bool {
    module.starts_with('.') || module.starts_with('/')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Definition,
    Import,
    Usage,
}

/// A line mentioning a symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub line_number: usize,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    /// Surrounding lines, the matching line included
    pub context: Vec<ContextLine>,
}
