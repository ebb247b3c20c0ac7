use crate::command::domain::{
    parse_payload, CommandAction, CommandOutcome, DependencyGraphOutput, DependencyGraphPayload,
    ExportsOutput, FilePayload, ImportsOutput, ReferencesOutput, ReferencesPayload,
    SymbolsOutput, SymbolsPayload,
};
use anyhow::Result;
use gitgate_graph::build_dependency_graph;
use gitgate_symbols::{detect_language, find_exports, find_references, find_symbols, parse_imports};
use serde_json::Value;

/// Symbol, import and dependency extraction over request content
pub(crate) struct AnalysisService;

impl AnalysisService {
    pub fn symbols(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: SymbolsPayload = parse_payload(CommandAction::Symbols, payload)?;
        let content = payload.content.unwrap_or_default();
        let symbols = find_symbols(&content, &payload.path, &payload.query);
        let language = payload.query.language.or_else(|| detect_language(&payload.path));
        CommandOutcome::from_value(SymbolsOutput {
            path: payload.path,
            language,
            symbols,
        })
    }

    pub fn imports(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: FilePayload = parse_payload(CommandAction::Imports, payload)?;
        let imports = parse_imports(
            payload.content.as_deref().unwrap_or_default(),
            &payload.path,
            payload.language,
        );
        CommandOutcome::from_value(ImportsOutput {
            path: payload.path,
            imports,
        })
    }

    pub fn exports(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: FilePayload = parse_payload(CommandAction::Exports, payload)?;
        let exports = find_exports(
            payload.content.as_deref().unwrap_or_default(),
            &payload.path,
            payload.language,
        );
        CommandOutcome::from_value(ExportsOutput {
            path: payload.path,
            exports,
        })
    }

    pub fn references(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: ReferencesPayload = parse_payload(CommandAction::References, payload)?;
        let references = find_references(
            payload.content.as_deref().unwrap_or_default(),
            &payload.symbol,
            &payload.path,
            payload.context_lines,
        );
        CommandOutcome::from_value(ReferencesOutput {
            symbol: payload.symbol,
            references,
        })
    }

    pub fn dependency_graph(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: DependencyGraphPayload =
            parse_payload(CommandAction::DependencyGraph, payload)?;
        let graph = build_dependency_graph(&payload.files);
        let stats = graph.stats();
        CommandOutcome::from_value(DependencyGraphOutput { graph, stats })
    }
}
