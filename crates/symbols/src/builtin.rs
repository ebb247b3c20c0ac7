//! Builtin pattern tables for the six language keys.

use crate::language::Language;
use crate::patterns::{ImportPatternSpec, LanguagePatternSpecs, SymbolListStyle, SymbolPatternSpec};
use crate::types::{ImportType, SymbolType};
use std::collections::HashMap;

const JS_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "function", "return", "with", "super", "typeof",
];
const JAVA_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "new", "return", "else"];

pub(crate) fn table_specs() -> HashMap<Language, LanguagePatternSpecs> {
    HashMap::from([
        (Language::JavaScript, javascript()),
        (Language::Python, python()),
        (Language::Go, go()),
        (Language::Ruby, ruby()),
        (Language::Java, java()),
        (Language::Rust, rust()),
    ])
}

fn sym(pattern: &str, kind: SymbolType) -> SymbolPatternSpec {
    SymbolPatternSpec {
        pattern: pattern.to_string(),
        kind,
        name_group: 1,
        exclude: Vec::new(),
    }
}

fn sym_excluding(pattern: &str, kind: SymbolType, exclude: &[&str]) -> SymbolPatternSpec {
    SymbolPatternSpec {
        exclude: exclude.iter().map(|s| (*s).to_string()).collect(),
        ..sym(pattern, kind)
    }
}

fn imp(pattern: &str, kind: ImportType, module_group: usize) -> ImportPatternSpec {
    ImportPatternSpec {
        pattern: pattern.to_string(),
        kind,
        module_group,
        symbols_group: None,
        symbol_style: SymbolListStyle::None,
        inner_pattern: None,
    }
}

fn imp_with_symbols(
    pattern: &str,
    kind: ImportType,
    module_group: usize,
    symbols_group: Option<usize>,
    symbol_style: SymbolListStyle,
) -> ImportPatternSpec {
    ImportPatternSpec {
        symbols_group,
        symbol_style,
        ..imp(pattern, kind, module_group)
    }
}

fn javascript() -> LanguagePatternSpecs {
    LanguagePatternSpecs {
        symbols: vec![
            sym(
                r"(?m)^[ \t]*(?:export[ \t]+)?(?:default[ \t]+)?(?:async[ \t]+)?function\b[ \t]*\*?[ \t]*([A-Za-z_$][\w$]*)",
                SymbolType::Function,
            ),
            sym(
                r"(?m)^[ \t]*(?:export[ \t]+)?(?:default[ \t]+)?(?:abstract[ \t]+)?class[ \t]+([A-Za-z_$][\w$]*)",
                SymbolType::Class,
            ),
            sym(
                r"(?m)^[ \t]*(?:export[ \t]+)?(?:const|let|var)[ \t]+([A-Za-z_$][\w$]*)[ \t]*(?::[^=\n]+)?=[ \t]*(?:async[ \t]+)?(?:function\b|\([^)\n]*\)[ \t]*(?::[^=\n]+)?=>|[A-Za-z_$][\w$]*[ \t]*=>)",
                SymbolType::Function,
            ),
            sym(
                r"(?m)^[ \t]*(?:export[ \t]+)?(?:declare[ \t]+)?interface[ \t]+([A-Za-z_$][\w$]*)",
                SymbolType::Interface,
            ),
            sym(
                r"(?m)^[ \t]*(?:export[ \t]+)?(?:declare[ \t]+)?type[ \t]+([A-Za-z_$][\w$]*)[ \t]*(?:<[^>\n]*>)?[ \t]*=",
                SymbolType::Type,
            ),
            sym(
                r"(?m)^[ \t]*(?:export[ \t]+)?(?:declare[ \t]+)?(?:const[ \t]+)?enum[ \t]+([A-Za-z_$][\w$]*)",
                SymbolType::Enum,
            ),
            sym_excluding(
                r"(?m)^[ \t]+(?:(?:public|private|protected|static|async|readonly|override|get|set)[ \t]+)*([A-Za-z_$][\w$]*)[ \t]*\([^)\n]*\)[ \t]*(?::[ \t]*[^{\n]+)?\{",
                SymbolType::Method,
                JS_KEYWORDS,
            ),
        ],
        imports: vec![
            imp_with_symbols(
                r#"(?m)^[ \t]*import[ \t]+(?:type[ \t]+)?([\w$*{}\s,]+?)\s+from[ \t]*['"]([^'"\n]+)['"]"#,
                ImportType::Import,
                2,
                Some(1),
                SymbolListStyle::JsClause,
            ),
            imp(
                r#"(?m)^[ \t]*import[ \t]*['"]([^'"\n]+)['"]"#,
                ImportType::SideEffect,
                1,
            ),
            imp_with_symbols(
                r#"(?m)^[ \t]*export[ \t]+(?:type[ \t]+)?(\*(?:[ \t]+as[ \t]+[\w$]+)?|\{[^}]*\})[ \t]*from[ \t]*['"]([^'"\n]+)['"]"#,
                ImportType::ExportFrom,
                2,
                Some(1),
                SymbolListStyle::JsClause,
            ),
            imp_with_symbols(
                r#"\b(?:const|let|var)[ \t]+(\{[^}]*\}|[\w$]+)[ \t]*=[ \t]*require[ \t]*\([ \t]*['"]([^'"\n]+)['"][ \t]*\)"#,
                ImportType::Require,
                2,
                Some(1),
                SymbolListStyle::JsBinding,
            ),
            imp(
                r#"\brequire[ \t]*\([ \t]*['"]([^'"\n]+)['"][ \t]*\)"#,
                ImportType::Require,
                1,
            ),
            imp(
                r#"\bimport[ \t]*\([ \t]*['"]([^'"\n]+)['"][ \t]*\)"#,
                ImportType::DynamicImport,
                1,
            ),
        ],
    }
}

fn python() -> LanguagePatternSpecs {
    LanguagePatternSpecs {
        symbols: vec![
            sym(r"(?m)^[ \t]*class[ \t]+([A-Za-z_]\w*)", SymbolType::Class),
            sym(r"(?m)^(?:async[ \t]+)?def[ \t]+([A-Za-z_]\w*)", SymbolType::Function),
            sym(r"(?m)^[ \t]+(?:async[ \t]+)?def[ \t]+([A-Za-z_]\w*)", SymbolType::Method),
        ],
        imports: vec![
            imp_with_symbols(
                r"(?m)^[ \t]*from[ \t]+(\.*[\w.]*)[ \t]+import[ \t]+(\([^)]*\)|[^\n#;]+)",
                ImportType::FromImport,
                1,
                Some(2),
                SymbolListStyle::CommaList,
            ),
            imp_with_symbols(
                r"(?m)^[ \t]*import[ \t]+([\w.]+(?:[ \t]+as[ \t]+\w+)?(?:[ \t]*,[ \t]*[\w.]+(?:[ \t]+as[ \t]+\w+)?)*)",
                ImportType::Import,
                1,
                None,
                SymbolListStyle::ModuleList,
            ),
        ],
    }
}

fn go() -> LanguagePatternSpecs {
    LanguagePatternSpecs {
        symbols: vec![
            sym(r"(?m)^func[ \t]+([A-Za-z_]\w*)", SymbolType::Function),
            sym(r"(?m)^func[ \t]*\([^)]*\)[ \t]*([A-Za-z_]\w*)", SymbolType::Method),
            sym(r"(?m)^[ \t]*type[ \t]+([A-Za-z_]\w*)[ \t]+struct\b", SymbolType::Struct),
            sym(r"(?m)^[ \t]*type[ \t]+([A-Za-z_]\w*)[ \t]+interface\b", SymbolType::Interface),
            sym(
                r"(?m)^[ \t]*type[ \t]+([A-Za-z_]\w*)[ \t]+(?:=[ \t]*)?[\w.*\[\]]+[ \t]*$",
                SymbolType::Type,
            ),
        ],
        imports: vec![
            imp(
                r#"(?m)^[ \t]*import[ \t]+(?:[\w.]+[ \t]+)?"([^"\n]+)""#,
                ImportType::Import,
                1,
            ),
            ImportPatternSpec {
                inner_pattern: Some(r#"(?m)^[ \t]*(?:[\w.]+[ \t]+)?"([^"\n]+)""#.to_string()),
                ..imp(r"(?m)^[ \t]*import[ \t]*\(([^)]*)\)", ImportType::ImportGroup, 1)
            },
        ],
    }
}

fn ruby() -> LanguagePatternSpecs {
    LanguagePatternSpecs {
        symbols: vec![
            sym(r"(?m)^[ \t]*class[ \t]+([A-Z]\w*(?:::[A-Z]\w*)*)", SymbolType::Class),
            sym(r"(?m)^[ \t]*module[ \t]+([A-Z]\w*(?:::[A-Z]\w*)*)", SymbolType::Module),
            sym(r"(?m)^[ \t]*def[ \t]+(?:self\.)?([A-Za-z_]\w*[?!=]?)", SymbolType::Method),
        ],
        imports: vec![
            imp(
                r#"(?m)^[ \t]*require[ \t]*\(?[ \t]*['"]([^'"\n]+)['"]"#,
                ImportType::Require,
                1,
            ),
            imp(
                r#"(?m)^[ \t]*require_relative[ \t]*\(?[ \t]*['"]([^'"\n]+)['"]"#,
                ImportType::RequireRelative,
                1,
            ),
        ],
    }
}

fn java() -> LanguagePatternSpecs {
    const MODIFIERS: &str = r"(?:(?:public|private|protected|internal|abstract|final|static|sealed|partial|open|data|inner)[ \t]+)*";
    LanguagePatternSpecs {
        symbols: vec![
            sym(
                &format!(r"(?m)^[ \t]*{MODIFIERS}class[ \t]+([A-Za-z_]\w*)"),
                SymbolType::Class,
            ),
            sym(
                &format!(r"(?m)^[ \t]*{MODIFIERS}interface[ \t]+([A-Za-z_]\w*)"),
                SymbolType::Interface,
            ),
            sym(
                &format!(r"(?m)^[ \t]*{MODIFIERS}enum[ \t]+(?:class[ \t]+)?([A-Za-z_]\w*)"),
                SymbolType::Enum,
            ),
            sym(
                &format!(r"(?m)^[ \t]*{MODIFIERS}struct[ \t]+([A-Za-z_]\w*)"),
                SymbolType::Struct,
            ),
            sym(
                r"(?m)^[ \t]*(?:(?:public|private|protected|internal|override|open|suspend|inline|abstract|operator|infix|tailrec)[ \t]+)*fun[ \t]+(?:<[^>\n]*>[ \t]*)?(?:[\w.]+\.)?([A-Za-z_]\w*)[ \t]*\(",
                SymbolType::Function,
            ),
            sym_excluding(
                r"(?m)^[ \t]+(?:(?:public|private|protected|internal|static|final|abstract|synchronized|override|virtual|async|native)[ \t]+)+(?:<[^>\n]*>[ \t]+)?[\w\[\],.?]+(?:<[^>\n]*>)?[ \t]+([A-Za-z_]\w*)[ \t]*\(",
                SymbolType::Method,
                JAVA_KEYWORDS,
            ),
        ],
        imports: vec![
            imp_with_symbols(
                r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?(\w+(?:\.\w+)*(?:\.\*)?)",
                ImportType::Import,
                1,
                None,
                SymbolListStyle::LastSegment,
            ),
            imp(
                r"(?m)^[ \t]*using[ \t]+(?:static[ \t]+)?([\w.]+)[ \t]*;",
                ImportType::Using,
                1,
            ),
        ],
    }
}

fn rust() -> LanguagePatternSpecs {
    const VIS: &str = r"(?:pub(?:\([^)\n]*\))?[ \t]+)?";
    LanguagePatternSpecs {
        symbols: vec![
            sym(
                &format!(r"(?m)^[ \t]*{VIS}const[ \t]+(?:async[ \t]+)?(?:unsafe[ \t]+)?fn[ \t]+([A-Za-z_]\w*)"),
                SymbolType::ConstFn,
            ),
            sym(
                &format!(r#"(?m)^{VIS}(?:async[ \t]+)?(?:unsafe[ \t]+)?(?:extern[ \t]+"[^"\n]*"[ \t]+)?fn[ \t]+([A-Za-z_]\w*)"#),
                SymbolType::Function,
            ),
            sym(
                &format!(r#"(?m)^[ \t]+{VIS}(?:default[ \t]+)?(?:async[ \t]+)?(?:unsafe[ \t]+)?(?:extern[ \t]+"[^"\n]*"[ \t]+)?fn[ \t]+([A-Za-z_]\w*)"#),
                SymbolType::Method,
            ),
            sym(
                &format!(r"(?m)^[ \t]*{VIS}struct[ \t]+([A-Za-z_]\w*)"),
                SymbolType::Struct,
            ),
            sym(
                &format!(r"(?m)^[ \t]*{VIS}enum[ \t]+([A-Za-z_]\w*)"),
                SymbolType::Enum,
            ),
            sym(
                &format!(r"(?m)^[ \t]*{VIS}(?:unsafe[ \t]+)?(?:auto[ \t]+)?trait[ \t]+([A-Za-z_]\w*)"),
                SymbolType::Trait,
            ),
            sym(
                &format!(r"(?m)^[ \t]*{VIS}type[ \t]+([A-Za-z_]\w*)"),
                SymbolType::Type,
            ),
            sym(
                &format!(r"(?m)^[ \t]*{VIS}mod[ \t]+([A-Za-z_]\w*)"),
                SymbolType::Module,
            ),
            sym(
                r"(?m)^[ \t]*(?:unsafe[ \t]+)?impl(?:<[^>\n]*>)?[ \t]+(?:[\w:]+(?:<[^>\n]*>)?[ \t]+for[ \t]+)?([A-Za-z_]\w*)",
                SymbolType::Impl,
            ),
            sym(r"(?m)^[ \t]*macro_rules![ \t]*([A-Za-z_]\w*)", SymbolType::Macro),
        ],
        imports: vec![
            imp_with_symbols(
                &format!(r"(?m)^[ \t]*{VIS}use[ \t]+([^;]+);"),
                ImportType::Use,
                1,
                None,
                SymbolListStyle::RustUseTree,
            ),
            imp(
                r"(?m)^[ \t]*extern[ \t]+crate[ \t]+([A-Za-z_]\w*)",
                ImportType::ExternCrate,
                1,
            ),
        ],
    }
}
