use crate::cycles::find_cycles;
use crate::resolve::{module_to_path, resolve_import_path, FileIndex};
use crate::types::*;
use gitgate_symbols::{detect_language, PatternTable};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Build a dependency graph with the builtin pattern tables
pub fn build_dependency_graph(files: &[SourceFile]) -> DependencyGraph {
    GraphBuilder::default().build(files)
}

/// Builds [`DependencyGraph`]s from batches of files
pub struct GraphBuilder<'a> {
    patterns: &'a PatternTable,
}

impl Default for GraphBuilder<'static> {
    fn default() -> Self {
        Self::new(PatternTable::builtin())
    }
}

impl<'a> GraphBuilder<'a> {
    pub fn new(patterns: &'a PatternTable) -> Self {
        Self { patterns }
    }

    /// Build the graph for `files`.
    ///
    /// A path given twice keeps its first copy.
    pub fn build(&self, files: &[SourceFile]) -> DependencyGraph {
        // Phase 1: unique files and the index used for resolution
        let mut unique: Vec<&SourceFile> = Vec::with_capacity(files.len());
        let mut index = FileIndex::default();
        for file in files {
            if index.contains(&file.path) {
                log::warn!("Duplicate path in graph input, keeping first copy: {}", file.path);
                continue;
            }
            index.insert(&file.path);
            unique.push(file);
        }

        // Phase 2: nodes with resolved imports and exports
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut node_index: HashMap<&str, NodeIndex> = HashMap::new();
        let mut nodes = Vec::with_capacity(unique.len());
        let mut edges = Vec::new();

        for file in &unique {
            node_index.insert(file.path.as_str(), graph.add_node(file.path.clone()));
        }

        for file in &unique {
            let language = detect_language(&file.path);
            let mut imports = Vec::new();

            for import in self.patterns.parse_imports(&file.content, &file.path, language) {
                let candidate = resolve_import_path(&module_to_path(language, &import.module), &file.path);
                let resolved_path = index.resolve(&candidate).map(str::to_string);

                if let Some(to) = &resolved_path {
                    if let (Some(&from_idx), Some(&to_idx)) =
                        (node_index.get(file.path.as_str()), node_index.get(to.as_str()))
                    {
                        graph.add_edge(from_idx, to_idx, ());
                    }
                    edges.push(GraphEdge {
                        from: file.path.clone(),
                        to: to.clone(),
                        symbols: import.symbols.clone(),
                        import_type: import.kind,
                        line_number: import.line_number,
                    });
                }

                imports.push(ResolvedImport {
                    is_external: resolved_path.is_none(),
                    module: import.module,
                    resolved_path,
                    symbols: import.symbols,
                    import_type: import.kind,
                    line_number: import.line_number,
                });
            }

            let exports: Vec<ExportedSymbol> = self
                .patterns
                .find_exports(&file.content, &file.path, language)
                .into_iter()
                .map(|symbol| ExportedSymbol {
                    name: symbol.name,
                    kind: symbol.kind,
                    line_number: symbol.line_number,
                })
                .collect();

            nodes.push(GraphNode {
                path: file.path.clone(),
                language,
                import_count: imports.len(),
                export_count: exports.len(),
                imports,
                exports,
            });
        }

        // Phase 3: classification and cycles
        let has_no = |idx: NodeIndex, direction: Direction| {
            graph.neighbors_directed(idx, direction).next().is_none()
        };
        let entry_points = graph
            .node_indices()
            .filter(|idx| has_no(*idx, Direction::Incoming))
            .map(|idx| graph[idx].clone())
            .collect();
        let leaf_nodes = graph
            .node_indices()
            .filter(|idx| has_no(*idx, Direction::Outgoing))
            .map(|idx| graph[idx].clone())
            .collect();
        let circular = find_cycles(&graph);

        let result = DependencyGraph {
            nodes,
            edges,
            entry_points,
            leaf_nodes,
            circular,
        };

        let stats = result.stats();
        log::info!(
            "Built dependency graph: {} nodes, {} edges, {} external imports, {} cycles",
            stats.nodes,
            stats.edges,
            stats.external_imports,
            stats.cycles
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_file_cycle() {
        let files = vec![
            SourceFile::new("a.js", "import { b } from './b';\nexport function a() {}\n"),
            SourceFile::new("b.js", "import { a } from './a';\nexport function b() {}\n"),
        ];
        let graph = build_dependency_graph(&files);

        assert_eq!(graph.circular, vec![vec!["a.js".to_string(), "b.js".to_string()]]);
        assert!(graph.entry_points.is_empty());
        assert!(graph.leaf_nodes.is_empty());
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].symbols, vec!["b".to_string()]);
    }

    #[test]
    fn test_require_cycle() {
        let files = vec![
            SourceFile::new("a.js", "const b = require('./b');\nmodule.exports = () => b();\n"),
            SourceFile::new("b.js", "const a = require('./a');\nmodule.exports = () => a();\n"),
        ];
        let graph = build_dependency_graph(&files);

        assert_eq!(graph.circular, vec![vec!["a.js".to_string(), "b.js".to_string()]]);
        assert_eq!(graph.edges.len(), 2);
        assert!(graph.entry_points.is_empty());
    }

    #[test]
    fn test_entry_and_leaf_classification() {
        let files = vec![
            SourceFile::new("src/main.ts", "import { run } from './app';\nimport React from 'react';\n"),
            SourceFile::new("src/app.ts", "import { fmt } from './util/fmt';\nexport const run = () => fmt();\n"),
            SourceFile::new("src/util/fmt.ts", "export function fmt() {}\n"),
            SourceFile::new("README.md", "# docs\n"),
        ];
        let graph = build_dependency_graph(&files);

        assert_eq!(graph.entry_points, vec!["src/main.ts", "README.md"]);
        assert_eq!(graph.leaf_nodes, vec!["src/util/fmt.ts", "README.md"]);
        assert!(graph.circular.is_empty());

        let main = graph.node("src/main.ts").unwrap();
        assert_eq!(main.import_count, 2);
        assert_eq!(main.imports[0].resolved_path.as_deref(), Some("src/app.ts"));
        assert!(main.imports[1].is_external);
        assert_eq!(main.imports[1].resolved_path, None);

        let app = graph.node("src/app.ts").unwrap();
        assert_eq!(app.export_count, 1);
        assert_eq!(app.exports[0].name, "run");

        assert_eq!(graph.dependencies_of("src/app.ts"), vec!["src/util/fmt.ts"]);
        assert_eq!(graph.dependents_of("src/app.ts"), vec!["src/main.ts"]);
        assert_eq!(graph.stats().external_imports, 1);
    }

    #[test]
    fn test_every_edge_endpoint_is_a_node() {
        let files = vec![
            SourceFile::new("pkg/__init__.py", "from .models import User\n"),
            SourceFile::new("pkg/models.py", "from pkg import helpers\nclass User:\n    pass\n"),
            SourceFile::new("pkg/helpers.py", "import os\n"),
        ];
        let graph = build_dependency_graph(&files);

        for edge in &graph.edges {
            assert!(graph.node(&edge.from).is_some());
            assert!(graph.node(&edge.to).is_some());
        }
        assert_eq!(graph.dependencies_of("pkg/__init__.py"), vec!["pkg/models.py"]);
        assert_eq!(graph.dependencies_of("pkg/models.py"), vec!["pkg/__init__.py"]);
        assert_eq!(
            graph.circular,
            vec![vec!["pkg/__init__.py".to_string(), "pkg/models.py".to_string()]]
        );
    }

    #[test]
    fn test_duplicate_paths_keep_first_copy() {
        let files = vec![
            SourceFile::new("a.js", "import './b';\n"),
            SourceFile::new("a.js", "export function other() {}\n"),
            SourceFile::new("b.js", ""),
        ];
        let graph = build_dependency_graph(&files);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.dependencies_of("a.js"), vec!["b.js"]);
        assert!(graph.node("a.js").unwrap().exports.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(build_dependency_graph(&[]), DependencyGraph::default());
    }
}
