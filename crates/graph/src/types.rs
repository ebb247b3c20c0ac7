use gitgate_symbols::{ImportType, Language, SymbolType};
use serde::{Deserialize, Serialize};

/// One file handed to the graph builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Repository-relative path, `/` separated
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Import of a node, with the file it points at when it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImport {
    /// Module string as written in the source
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<String>,
    pub symbols: Vec<String>,
    pub import_type: ImportType,
    pub line_number: usize,
    /// Not resolvable within the scanned set
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SymbolType,
    pub line_number: usize,
}

/// File in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    pub imports: Vec<ResolvedImport>,
    pub exports: Vec<ExportedSymbol>,
    pub import_count: usize,
    pub export_count: usize,
}

/// Resolved import from one scanned file to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub symbols: Vec<String>,
    pub import_type: ImportType,
    pub line_number: usize,
}

/// Cross-file import graph.
///
/// Every edge endpoint is a node path. A path is an entry point iff no edge
/// targets it and a leaf node iff no edge leaves it; both lists follow the
/// input order. `circular` is empty for a DAG.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub entry_points: Vec<String>,
    pub leaf_nodes: Vec<String>,
    pub circular: Vec<Vec<String>>,
}

impl DependencyGraph {
    pub fn node(&self, path: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.path == path)
    }

    /// Paths `path` imports, in edge order
    pub fn dependencies_of(&self, path: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|edge| edge.from == path)
            .map(|edge| edge.to.as_str())
            .collect()
    }

    /// Paths importing `path`, in edge order
    pub fn dependents_of(&self, path: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|edge| edge.to == path)
            .map(|edge| edge.from.as_str())
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            external_imports: self
                .nodes
                .iter()
                .flat_map(|node| &node.imports)
                .filter(|import| import.is_external)
                .count(),
            cycles: self.circular.len(),
        }
    }
}

/// Size summary of a [`DependencyGraph`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub external_imports: usize,
    pub cycles: usize,
}
