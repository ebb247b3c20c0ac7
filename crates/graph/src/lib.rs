//! # Gitgate Graph
//!
//! Cross-file dependency analysis over a batch of fetched files.
//!
//! ## Architecture
//!
//! ```text
//! SourceFile[] { path, content }
//!     │
//!     ├──> Import extraction (gitgate-symbols pattern tables)
//!     │
//!     ├──> Resolution against the scanned set
//!     │      ├─ exact path
//!     │      ├─ same path without extension
//!     │      ├─ directory index (index, __init__, mod)
//!     │      └─ known extensions appended
//!     │
//!     └──> Dependency graph (petgraph)
//!            ├─ Nodes: files, with imports and exports
//!            ├─ Edges: resolved imports
//!            └─ Entry points, leaf nodes, cycles
//! ```
//!
//! Unresolved imports stay on their node marked `isExternal` and produce no
//! edge.

mod builder;
mod cycles;
mod resolve;
mod types;

pub use builder::{build_dependency_graph, GraphBuilder};
pub use cycles::find_cycles;
pub use resolve::{
    module_to_path, resolve_import_path, strip_extension, FileIndex, INDEX_NAMES,
    RESOLVE_EXTENSIONS,
};
pub use types::{
    DependencyGraph, ExportedSymbol, GraphEdge, GraphNode, GraphStats, ResolvedImport, SourceFile,
};
