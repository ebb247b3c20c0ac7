use crate::extract::SymbolQuery;
use crate::language::detect_language;
use crate::patterns::PatternTable;
use crate::types::{Reference, ReferenceKind};
use gitgate_content::{normalize, ContextLine, NormalizeOptions};
use regex::Regex;
use std::collections::HashSet;

impl PatternTable {
    /// Classify every line mentioning `symbol_name`.
    ///
    /// Matching only anchors the *start* of the name on a word boundary:
    /// `foo` matches inside `fooBar` but not inside `myfoo`. Callers rely on
    /// this prefix behaviour, so it is kept as is.
    ///
    /// Files without pattern support still get `usage` hits; only the
    /// `definition`/`import` classification needs the language.
    pub fn find_references(
        &self,
        content: &str,
        symbol_name: &str,
        file_path: &str,
        context_lines: usize,
    ) -> Vec<Reference> {
        if symbol_name.is_empty() {
            return Vec::new();
        }
        let Ok(word) = Regex::new(&format!(r"\b{}", regex::escape(symbol_name))) else {
            return Vec::new();
        };

        let content = normalize(content, &NormalizeOptions::default());
        let language = detect_language(file_path);

        let definition_lines: HashSet<usize> = self
            .find_symbols(
                &content,
                file_path,
                &SymbolQuery {
                    language,
                    ..Default::default()
                },
            )
            .into_iter()
            .filter(|symbol| symbol.name == symbol_name)
            .map(|symbol| symbol.line_number)
            .collect();

        let import_lines: HashSet<usize> = self
            .parse_imports(&content, file_path, language)
            .iter()
            .filter(|import| import.mentions(symbol_name))
            .flat_map(|import| import.line_number..=import.end_line())
            .collect();

        let lines: Vec<&str> = if content.is_empty() {
            Vec::new()
        } else {
            content.split('\n').collect()
        };

        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| word.is_match(line))
            .map(|(idx, line)| {
                let line_number = idx + 1;
                let kind = if definition_lines.contains(&line_number) {
                    ReferenceKind::Definition
                } else if import_lines.contains(&line_number) {
                    ReferenceKind::Import
                } else {
                    ReferenceKind::Usage
                };

                let from = idx.saturating_sub(context_lines);
                let to = (idx + context_lines).min(lines.len() - 1);
                let context = (from..=to)
                    .map(|i| ContextLine {
                        line_number: i + 1,
                        text: lines[i].to_string(),
                    })
                    .collect();

                Reference {
                    line_number,
                    text: (*line).to_string(),
                    kind,
                    context,
                }
            })
            .collect()
    }
}
