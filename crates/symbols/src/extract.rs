use crate::language::{detect_language, Language};
use crate::patterns::PatternTable;
use crate::types::{Symbol, SymbolType};
use gitgate_content::{normalize, LineIndex, NormalizeOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Filters for [`PatternTable::find_symbols`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SymbolQuery {
    /// Override the language detected from the file path
    pub language: Option<Language>,
    /// Case-insensitive substring the name must contain
    pub name_filter: Option<String>,
    /// Only symbols of this kind
    pub type_filter: Option<SymbolType>,
}

impl PatternTable {
    /// Locate symbol definitions in `content`.
    ///
    /// Every pattern of the language runs over the whole document; the line
    /// number is derived from the byte offset of the name capture, so
    /// patterns that swallow leading blank lines still report the right
    /// line. Output is ascending by line and unique on `(name, line)`.
    pub fn find_symbols(&self, content: &str, file_path: &str, query: &SymbolQuery) -> Vec<Symbol> {
        let Some(language) = query.language.or_else(|| detect_language(file_path)) else {
            log::debug!("No symbol patterns for {file_path}");
            return Vec::new();
        };
        let Some(patterns) = self.get(language) else {
            return Vec::new();
        };

        let content = normalize(content, &NormalizeOptions::default());
        let index = LineIndex::new(&content);

        let mut seen: HashSet<(String, usize)> = HashSet::new();
        let mut symbols = Vec::new();

        for pattern in &patterns.symbols {
            for caps in pattern.regex.captures_iter(&content) {
                let Some(name) = caps.get(pattern.name_group) else {
                    continue;
                };
                if name.as_str().is_empty() || pattern.excludes(name.as_str()) {
                    continue;
                }

                let line_number = index.line_at(name.start());
                if !seen.insert((name.as_str().to_string(), line_number)) {
                    continue;
                }

                symbols.push(Symbol {
                    name: name.as_str().to_string(),
                    kind: pattern.kind,
                    line_number,
                    text: index.line_text(line_number).unwrap_or_default().to_string(),
                });
            }
        }

        // Stable: on a shared line the earlier pattern keeps its place.
        symbols.sort_by_key(|s| s.line_number);

        let name_filter = query.name_filter.as_ref().map(|f| f.to_lowercase());
        symbols.retain(|s| {
            name_filter
                .as_ref()
                .map_or(true, |f| s.name.to_lowercase().contains(f))
                && query.type_filter.map_or(true, |t| s.kind == t)
        });

        symbols
    }

    /// Symbols visible to other files, by per-language convention.
    pub fn find_exports(&self, content: &str, file_path: &str, language: Option<Language>) -> Vec<Symbol> {
        let Some(language) = language.or_else(|| detect_language(file_path)) else {
            return Vec::new();
        };
        let query = SymbolQuery {
            language: Some(language),
            ..Default::default()
        };
        self.find_symbols(content, file_path, &query)
            .into_iter()
            .filter(|symbol| is_exported(language, symbol))
            .collect()
    }
}

/// Visibility heuristic for a symbol.
///
/// JavaScript needs an `export` keyword, Python hides `_names`, Go exports
/// capitalized names, Rust needs `pub`, Ruby exposes classes and modules and
/// Java-family files expose everything not marked `private`. Methods are
/// never file-level exports.
pub fn is_exported(language: Language, symbol: &Symbol) -> bool {
    if symbol.kind == SymbolType::Method {
        return false;
    }
    let line = symbol.text.trim_start();
    match language {
        Language::JavaScript => line.starts_with("export"),
        Language::Python => !symbol.name.starts_with('_'),
        Language::Go => symbol.name.chars().next().is_some_and(char::is_uppercase),
        Language::Rust => line.starts_with("pub") && symbol.kind != SymbolType::Impl,
        Language::Ruby => matches!(symbol.kind, SymbolType::Class | SymbolType::Module),
        Language::Java => !line.contains("private"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(symbols: &[Symbol]) -> Vec<(&str, SymbolType, usize)> {
        symbols
            .iter()
            .map(|s| (s.name.as_str(), s.kind, s.line_number))
            .collect()
    }

    fn find(content: &str, path: &str) -> Vec<Symbol> {
        PatternTable::builtin().find_symbols(content, path, &SymbolQuery::default())
    }

    #[test]
    fn test_js_line_accuracy() {
        let code = "// comment\n\nfunction foo() {\n  return 1;\n}\n\nfunction bar() {\n  return 2;\n}";
        let symbols = find(code, "a.js");
        assert_eq!(
            names(&symbols),
            vec![("foo", SymbolType::Function, 3), ("bar", SymbolType::Function, 7)]
        );
        assert_eq!(symbols[0].text, "function foo() {");
    }

    #[test]
    fn test_js_family() {
        let code = r#"
export default class Widget {
  constructor(props) {
    this.props = props;
  }

  async render() {
    if (this.props) {
      return null;
    }
  }
}

export const useThing = async (a, b) => a + b;
export interface Props { id: string }
export type Id = string;
enum Color { Red }
"#;
        let symbols = find(code, "widget.tsx");
        assert_eq!(
            names(&symbols),
            vec![
                ("Widget", SymbolType::Class, 2),
                ("constructor", SymbolType::Method, 3),
                ("render", SymbolType::Method, 7),
                ("useThing", SymbolType::Function, 14),
                ("Props", SymbolType::Interface, 15),
                ("Id", SymbolType::Type, 16),
                ("Color", SymbolType::Enum, 17),
            ]
        );
    }

    #[test]
    fn test_python_functions_and_methods() {
        let code = "import os\n\nclass Repo:\n    def fetch(self):\n        pass\n\nasync def main():\n    pass\n";
        assert_eq!(
            names(&find(code, "tool.py")),
            vec![
                ("Repo", SymbolType::Class, 3),
                ("fetch", SymbolType::Method, 4),
                ("main", SymbolType::Function, 7),
            ]
        );
    }

    #[test]
    fn test_go_symbols() {
        let code = "package main\n\ntype Server struct {\n}\n\ntype Handler interface {\n}\n\ntype ID string\n\nfunc (s *Server) Start() error {\n}\n\nfunc main() {\n}\n";
        assert_eq!(
            names(&find(code, "main.go")),
            vec![
                ("Server", SymbolType::Struct, 3),
                ("Handler", SymbolType::Interface, 6),
                ("ID", SymbolType::Type, 9),
                ("Start", SymbolType::Method, 11),
                ("main", SymbolType::Function, 14),
            ]
        );
    }

    #[test]
    fn test_rust_symbols() {
        let code = r#"pub struct Gateway;

pub(crate) const fn limit() -> usize { 1 }

impl<T> fmt::Display for Wrapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { Ok(()) }
}

pub trait Port {}
mod tests;
macro_rules! ensure { () => {} }
async fn run() {}
"#;
        assert_eq!(
            names(&find(code, "lib.rs")),
            vec![
                ("Gateway", SymbolType::Struct, 1),
                ("limit", SymbolType::ConstFn, 3),
                ("Wrapper", SymbolType::Impl, 5),
                ("fmt", SymbolType::Method, 6),
                ("Port", SymbolType::Trait, 9),
                ("tests", SymbolType::Module, 10),
                ("ensure", SymbolType::Macro, 11),
                ("run", SymbolType::Function, 12),
            ]
        );
    }

    #[test]
    fn test_ruby_and_java_symbols() {
        let ruby = "module Billing\n  class Invoice\n    def self.build\n    end\n    def paid?\n    end\n  end\nend\n";
        assert_eq!(
            names(&find(ruby, "invoice.rb")),
            vec![
                ("Billing", SymbolType::Module, 1),
                ("Invoice", SymbolType::Class, 2),
                ("build", SymbolType::Method, 3),
                ("paid?", SymbolType::Method, 5),
            ]
        );

        let java = "package a;\n\npublic class Repo {\n    public List<String> names(int x) {\n        if (x > 0) {}\n    }\n}\ninterface Store {}\n";
        assert_eq!(
            names(&find(java, "Repo.java")),
            vec![
                ("Repo", SymbolType::Class, 3),
                ("names", SymbolType::Method, 4),
                ("Store", SymbolType::Interface, 8),
            ]
        );
    }

    #[test]
    fn test_crlf_content_keeps_line_numbers() {
        let code = "\u{FEFF}// header\r\n\r\nfunction foo() {}\r\n";
        assert_eq!(names(&find(code, "a.js")), vec![("foo", SymbolType::Function, 3)]);
    }

    #[test]
    fn test_filters_and_unknown_language() {
        let code = "def alpha():\n    pass\n\nclass AlphaBeta:\n    pass\n";
        let table = PatternTable::builtin();

        let by_name = table.find_symbols(
            code,
            "x.py",
            &SymbolQuery {
                name_filter: Some("ALPHA".into()),
                ..Default::default()
            },
        );
        assert_eq!(by_name.len(), 2);

        let by_type = table.find_symbols(
            code,
            "x.py",
            &SymbolQuery {
                type_filter: Some(SymbolType::Class),
                ..Default::default()
            },
        );
        assert_eq!(names(&by_type), vec![("AlphaBeta", SymbolType::Class, 4)]);

        assert!(find(code, "notes.txt").is_empty());

        let forced = table.find_symbols(
            code,
            "notes.txt",
            &SymbolQuery {
                language: Some(Language::Python),
                ..Default::default()
            },
        );
        assert_eq!(forced.len(), 2);
    }

    #[test]
    fn test_exports() {
        let table = PatternTable::builtin();
        let js = "export function a() {}\nfunction b() {}\n";
        let exports = table.find_exports(js, "m.js", None);
        assert_eq!(names(&exports), vec![("a", SymbolType::Function, 1)]);

        let go = "func Public() {}\nfunc private() {}\n";
        let exports = table.find_exports(go, "m.go", None);
        assert_eq!(names(&exports), vec![("Public", SymbolType::Function, 1)]);

        let rust = "pub fn open() {}\nfn close() {}\nimpl Foo {}\n";
        let exports = table.find_exports(rust, "m.rs", None);
        assert_eq!(names(&exports), vec![("open", SymbolType::Function, 1)]);
    }
}
