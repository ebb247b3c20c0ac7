use crate::language::{detect_language, Language};
use crate::patterns::{ImportPattern, PatternTable, SymbolListStyle};
use crate::types::{is_relative_module, ImportRecord};
use gitgate_content::{normalize, LineIndex, NormalizeOptions};
use regex::Captures;
use std::collections::HashSet;

impl PatternTable {
    /// Locate import/require statements in `content`.
    ///
    /// Line numbers come from the statement start; entries of a grouped Go
    /// `import ( ... )` block each get the line of their own quoted path.
    /// Records are unique on `(module, type, module offset)` so one module
    /// imported through two different syntaxes is reported twice.
    pub fn parse_imports(
        &self,
        content: &str,
        file_path: &str,
        language: Option<Language>,
    ) -> Vec<ImportRecord> {
        let Some(language) = language.or_else(|| detect_language(file_path)) else {
            return Vec::new();
        };
        let Some(patterns) = self.get(language) else {
            return Vec::new();
        };

        let content = normalize(content, &NormalizeOptions::default());
        let index = LineIndex::new(&content);

        let mut seen = HashSet::new();
        let mut found: Vec<(usize, ImportRecord)> = Vec::new();

        for pattern in &patterns.imports {
            for caps in pattern.regex.captures_iter(&content) {
                for (offset, record) in records_for_match(pattern, &caps, &index) {
                    if seen.insert((record.module.clone(), record.kind, offset)) {
                        found.push((offset, record));
                    }
                }
            }
        }

        found.sort_by_key(|(offset, record)| (record.line_number, *offset));
        found.into_iter().map(|(_, record)| record).collect()
    }
}

fn records_for_match(
    pattern: &ImportPattern,
    caps: &Captures<'_>,
    index: &LineIndex<'_>,
) -> Vec<(usize, ImportRecord)> {
    let (Some(whole), Some(module)) = (caps.get(0), caps.get(pattern.module_group)) else {
        return Vec::new();
    };

    if let Some(inner) = &pattern.inner {
        return inner
            .captures_iter(module.as_str())
            .filter_map(|entry| entry.get(1))
            .map(|path| {
                let offset = module.start() + path.start();
                let line_number = index.line_at(offset);
                let text = index.line_text(line_number).unwrap_or_default().trim();
                (offset, record(path.as_str(), Vec::new(), pattern, line_number, text))
            })
            .collect();
    }

    let statement = whole.as_str();
    let leading = statement.len() - statement.trim_start().len();
    let line_number = index.line_at(whole.start() + leading);
    let text = statement.trim();

    let symbols_text = pattern
        .symbols_group
        .and_then(|group| caps.get(group))
        .map(|m| m.as_str());

    match pattern.symbol_style {
        SymbolListStyle::ModuleList => split_list(module.as_str())
            .into_iter()
            .map(|name| {
                let offset = module.start()
                    + module.as_str().find(name.as_str()).unwrap_or_default();
                (offset, record(&name, Vec::new(), pattern, line_number, text))
            })
            .collect(),
        SymbolListStyle::RustUseTree => {
            let (path, symbols) = split_use_tree(module.as_str());
            vec![(module.start(), record(&path, symbols, pattern, line_number, text))]
        }
        style => {
            let symbols = match (style, symbols_text) {
                (SymbolListStyle::JsClause, Some(clause)) => parse_js_clause(clause),
                (SymbolListStyle::JsBinding, Some(binding)) => parse_js_binding(binding),
                (SymbolListStyle::CommaList, Some(list)) => split_list(list),
                (SymbolListStyle::LastSegment, _) => last_segment(module.as_str()),
                _ => Vec::new(),
            };
            vec![(module.start(), record(module.as_str(), symbols, pattern, line_number, text))]
        }
    }
}

fn record(
    module: &str,
    symbols: Vec<String>,
    pattern: &ImportPattern,
    line_number: usize,
    text: &str,
) -> ImportRecord {
    ImportRecord {
        module: module.to_string(),
        symbols,
        kind: pattern.kind,
        line_number,
        text: text.to_string(),
        is_relative: is_relative_module(module),
    }
}

/// Drop an `as alias` (or `: alias`) suffix and surrounding noise.
fn strip_alias(item: &str) -> &str {
    let item = item.trim();
    let item = item.strip_prefix("type ").unwrap_or(item).trim();
    let item = match item.find(" as ") {
        Some(pos) => &item[..pos],
        None => item,
    };
    item.trim()
}

/// `a, b as c, (d)` → `[a, b, d]`; comment tails are ignored.
fn split_list(list: &str) -> Vec<String> {
    list.trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(|item| item.split('#').next().unwrap_or_default())
        .map(strip_alias)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// ES import clause: default binding, namespace binding and named list.
fn parse_js_clause(clause: &str) -> Vec<String> {
    let clause = clause.trim();
    let (outside, braced) = match (clause.find('{'), clause.rfind('}')) {
        (Some(open), Some(close)) if open < close => (
            format!("{}{}", &clause[..open], &clause[close + 1..]),
            Some(&clause[open + 1..close]),
        ),
        _ => (clause.to_string(), None),
    };

    let mut symbols = Vec::new();
    for item in outside.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Some(rest) = item.strip_prefix('*') {
            // `* as ns` binds the namespace under its local name
            match rest.trim().strip_prefix("as ") {
                Some(local) => symbols.push(local.trim().to_string()),
                None => symbols.push("*".to_string()),
            }
        } else {
            symbols.push(item.to_string());
        }
    }
    if let Some(braced) = braced {
        symbols.extend(
            braced
                .split(',')
                .map(strip_alias)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
    symbols
}

/// CommonJS binding: `{ a, b: c }` → `[a, b]`, `fs` → `[fs]`.
fn parse_js_binding(binding: &str) -> Vec<String> {
    let binding = binding.trim();
    match binding.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
        Some(inner) => inner
            .split(',')
            .map(|item| item.split(':').next().unwrap_or_default().trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        None => vec![binding.to_string()],
    }
}

fn last_segment(module: &str) -> Vec<String> {
    module
        .rsplit('.')
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| vec![s.to_string()])
        .unwrap_or_default()
}

/// `std::collections::{HashMap, HashSet as Set}` → (`std::collections`, `[HashMap, HashSet]`)
fn split_use_tree(tree: &str) -> (String, Vec<String>) {
    let tree: String = tree.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(open) = tree.find('{') {
        let path = tree[..open].trim().trim_end_matches("::").to_string();
        let close = tree.rfind('}').unwrap_or(tree.len());
        let inner = &tree[open + 1..close.max(open + 1)];
        let symbols = split_top_level(inner)
            .into_iter()
            .map(|item| strip_alias(item).to_string())
            .filter(|item| !item.is_empty())
            .collect();
        return (path, symbols);
    }

    let item = strip_alias(&tree);
    match item.rsplit_once("::") {
        Some((path, name)) => (path.to_string(), vec![name.to_string()]),
        None => (item.to_string(), Vec::new()),
    }
}

/// Split on commas that are not nested inside braces.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in list.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImportType;
    use pretty_assertions::assert_eq;

    fn parse(content: &str, path: &str) -> Vec<ImportRecord> {
        PatternTable::builtin().parse_imports(content, path, None)
    }

    fn summary(records: &[ImportRecord]) -> Vec<(&str, ImportType, usize, Vec<&str>)> {
        records
            .iter()
            .map(|r| {
                (
                    r.module.as_str(),
                    r.kind,
                    r.line_number,
                    r.symbols.iter().map(String::as_str).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_js_imports() {
        let code = r#"import React, { useState, useEffect as effect } from 'react';
import * as path from "node:path";
import './styles.css';
import {
  helper,
} from '../utils/helper';
export { thing as other } from './thing';
const { readFile, writeFile: write } = require('fs');
const lazy = () => import('./lazy');
"#;
        assert_eq!(
            summary(&parse(code, "app.ts")),
            vec![
                ("react", ImportType::Import, 1, vec!["React", "useState", "useEffect"]),
                ("node:path", ImportType::Import, 2, vec!["path"]),
                ("./styles.css", ImportType::SideEffect, 3, vec![]),
                ("../utils/helper", ImportType::Import, 4, vec!["helper"]),
                ("./thing", ImportType::ExportFrom, 7, vec!["thing"]),
                ("fs", ImportType::Require, 8, vec!["readFile", "writeFile"]),
                ("./lazy", ImportType::DynamicImport, 9, vec![]),
            ]
        );

        let records = parse(code, "app.ts");
        assert!(!records[0].is_relative);
        assert!(records[2].is_relative);
        assert_eq!(records[3].end_line(), 6);
    }

    #[test]
    fn test_python_imports() {
        let code = "import os, sys as system\nfrom . import sibling\nfrom ..pkg.mod import (\n    alpha,\n    beta as b,\n)\nfrom typing import List  # comment\n";
        assert_eq!(
            summary(&parse(code, "m.py")),
            vec![
                ("os", ImportType::Import, 1, vec![]),
                ("sys", ImportType::Import, 1, vec![]),
                (".", ImportType::FromImport, 2, vec!["sibling"]),
                ("..pkg.mod", ImportType::FromImport, 3, vec!["alpha", "beta"]),
                ("typing", ImportType::FromImport, 7, vec!["List"]),
            ]
        );
    }

    #[test]
    fn test_go_grouped_imports_get_own_lines() {
        let code = "package main\n\nimport \"errors\"\n\nimport (\n\t\"fmt\"\n\tlog \"github.com/sirupsen/logrus\"\n\n\t\"./internal/util\"\n)\n";
        let records = parse(code, "main.go");
        assert_eq!(
            summary(&records),
            vec![
                ("errors", ImportType::Import, 3, vec![]),
                ("fmt", ImportType::ImportGroup, 6, vec![]),
                ("github.com/sirupsen/logrus", ImportType::ImportGroup, 7, vec![]),
                ("./internal/util", ImportType::ImportGroup, 9, vec![]),
            ]
        );
        assert!(records[3].is_relative);
        assert_eq!(records[2].text, "log \"github.com/sirupsen/logrus\"");
    }

    #[test]
    fn test_rust_use_trees() {
        let code = "use std::collections::{HashMap, HashSet as Set};\npub(crate) use crate::error::Result;\nuse serde;\nuse a::{b::{c, d}, e};\nextern crate log;\n";
        assert_eq!(
            summary(&parse(code, "lib.rs")),
            vec![
                ("std::collections", ImportType::Use, 1, vec!["HashMap", "HashSet"]),
                ("crate::error", ImportType::Use, 2, vec!["Result"]),
                ("serde", ImportType::Use, 3, vec![]),
                ("a", ImportType::Use, 4, vec!["b::{c, d}", "e"]),
                ("log", ImportType::ExternCrate, 5, vec![]),
            ]
        );
    }

    #[test]
    fn test_ruby_and_java_imports() {
        let ruby = "require 'json'\nrequire_relative './models/user'\n";
        assert_eq!(
            summary(&parse(ruby, "app.rb")),
            vec![
                ("json", ImportType::Require, 1, vec![]),
                ("./models/user", ImportType::RequireRelative, 2, vec![]),
            ]
        );

        let java = "import java.util.List;\nimport static org.junit.Assert.*;\nusing System.Text;\n";
        assert_eq!(
            summary(&parse(java, "A.java")),
            vec![
                ("java.util.List", ImportType::Import, 1, vec!["List"]),
                ("org.junit.Assert.*", ImportType::Import, 2, vec!["*"]),
                ("System.Text", ImportType::Using, 3, vec![]),
            ]
        );
    }

    #[test]
    fn test_same_module_two_syntaxes_kept() {
        let code = "import fs from 'fs';\nconst fs2 = require('fs');\n";
        let records = parse(code, "a.js");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, ImportType::Import);
        assert_eq!(records[1].kind, ImportType::Require);
    }

    #[test]
    fn test_unknown_language_is_empty() {
        assert!(parse("import x from 'y'", "README.md").is_empty());
    }
}
