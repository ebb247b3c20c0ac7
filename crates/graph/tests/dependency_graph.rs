use gitgate_graph::{build_dependency_graph, GraphBuilder, SourceFile};
use gitgate_symbols::PatternTable;
use pretty_assertions::assert_eq;
use serde_json::json;

fn repo() -> Vec<SourceFile> {
    vec![
        SourceFile::new(
            "web/index.js",
            "const api = require('./lib/api');\nimport './styles.css';\n",
        ),
        SourceFile::new(
            "web/lib/api.js",
            "import { get } from '../http';\nexport async function fetchUser(id) {}\n",
        ),
        SourceFile::new("web/http/index.js", "export function get(url) {}\n"),
        SourceFile::new(
            "svc/main.go",
            "package main\n\nimport (\n\t\"fmt\"\n\t\"net/http\"\n)\n\nfunc main() {}\n",
        ),
    ]
}

#[test]
fn serializes_with_camel_case_wire_names() {
    let graph = build_dependency_graph(&repo());
    let value = serde_json::to_value(&graph).unwrap();

    assert_eq!(
        value["edges"][0],
        json!({
            "from": "web/index.js",
            "to": "web/lib/api.js",
            "symbols": ["api"],
            "importType": "require",
            "lineNumber": 1
        })
    );
    assert_eq!(value["entryPoints"], json!(["web/index.js", "svc/main.go"]));
    assert_eq!(value["leafNodes"], json!(["web/http/index.js", "svc/main.go"]));
    assert_eq!(value["circular"], json!([]));

    let css = &value["nodes"][0]["imports"][1];
    assert_eq!(css["module"], "./styles.css");
    assert_eq!(css["isExternal"], true);
    assert!(css.get("resolvedPath").is_none());
}

#[test]
fn go_group_imports_are_external_with_own_lines() {
    let graph = build_dependency_graph(&repo());
    let main = graph.node("svc/main.go").unwrap();

    let lines: Vec<(&str, usize, bool)> = main
        .imports
        .iter()
        .map(|i| (i.module.as_str(), i.line_number, i.is_external))
        .collect();
    assert_eq!(lines, vec![("fmt", 4, true), ("net/http", 5, true)]);
    assert_eq!(main.exports.len(), 0);
}

#[test]
fn empty_pattern_table_yields_isolated_nodes() {
    let table = PatternTable::empty();
    let graph = GraphBuilder::new(&table).build(&repo());

    assert!(graph.edges.is_empty());
    assert_eq!(graph.entry_points.len(), 4);
    assert_eq!(graph.entry_points, graph.leaf_nodes);
}
