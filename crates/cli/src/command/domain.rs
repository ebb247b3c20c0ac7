use anyhow::{Context, Result};
use gitgate_content::{LinePatch, PatchError, SearchMatch};
use gitgate_diff::DiffError;
use gitgate_graph::{DependencyGraph, GraphStats, SourceFile};
use gitgate_protocol::{ErrorCode, ErrorEnvelope, Truncation};
use gitgate_reference::ReferenceError;
use gitgate_symbols::{ImportRecord, Language, Reference, Symbol, SymbolQuery};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_REFERENCE_CONTEXT: usize = 1;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Normalize,
    LineMap,
    LineRange,
    Search,
    Patch,
    Symbols,
    Imports,
    Exports,
    References,
    DependencyGraph,
    LineReference,
    ParseRef,
    Drift,
    Diff,
    Languages,
    Capabilities,
}

impl CommandAction {
    pub const ALL: [CommandAction; 16] = [
        CommandAction::Normalize,
        CommandAction::LineMap,
        CommandAction::LineRange,
        CommandAction::Search,
        CommandAction::Patch,
        CommandAction::Symbols,
        CommandAction::Imports,
        CommandAction::Exports,
        CommandAction::References,
        CommandAction::DependencyGraph,
        CommandAction::LineReference,
        CommandAction::ParseRef,
        CommandAction::Drift,
        CommandAction::Diff,
        CommandAction::Languages,
        CommandAction::Capabilities,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::Normalize => "normalize",
            CommandAction::LineMap => "line_map",
            CommandAction::LineRange => "line_range",
            CommandAction::Search => "search",
            CommandAction::Patch => "patch",
            CommandAction::Symbols => "symbols",
            CommandAction::Imports => "imports",
            CommandAction::Exports => "exports",
            CommandAction::References => "references",
            CommandAction::DependencyGraph => "dependency_graph",
            CommandAction::LineReference => "line_reference",
            CommandAction::ParseRef => "parse_ref",
            CommandAction::Drift => "drift",
            CommandAction::Diff => "diff",
            CommandAction::Languages => "languages",
            CommandAction::Capabilities => "capabilities",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }

    pub fn error(err: &anyhow::Error, meta: ResponseMeta) -> Self {
        Self::error_with_code(err, classify_error(err), meta)
    }

    pub fn error_with_code(err: &anyhow::Error, code: ErrorCode, meta: ResponseMeta) -> Self {
        let message = format!("{err:#}");
        let mut error = ErrorEnvelope::new(code, message.clone());
        if let Some(hint) = error_hint(code) {
            error = error.with_hint(hint);
        }
        Self {
            status: CommandStatus::Error,
            message: Some(message),
            error: Some(error),
            data: Value::Null,
            meta,
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<CommandAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

pub struct CommandOutcome {
    pub data: Value,
    pub truncation: Option<Truncation>,
}

impl CommandOutcome {
    pub fn from_value<T: Serialize>(value: T) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(value)?,
            truncation: None,
        })
    }

    pub fn with_truncation(mut self, truncation: Option<Truncation>) -> Self {
        self.truncation = truncation;
        self
    }
}

/// Marker on payload parse failures, so they classify as `invalid_request`
#[derive(Debug)]
pub struct InvalidPayload(pub CommandAction);

impl std::fmt::Display for InvalidPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid payload for action '{}'", self.0.as_str())
    }
}

impl std::error::Error for InvalidPayload {}

pub fn parse_payload<T: DeserializeOwned>(action: CommandAction, payload: Value) -> Result<T> {
    serde_json::from_value(payload).context(InvalidPayload(action))
}

/// Map an error chain onto the wire error codes
pub fn classify_error(err: &anyhow::Error) -> ErrorCode {
    if err.downcast_ref::<InvalidPayload>().is_some() {
        return ErrorCode::InvalidRequest;
    }
    for cause in err.chain() {
        if cause.is::<PatchError>() {
            return ErrorCode::InvalidPatch;
        }
        if cause.is::<ReferenceError>() {
            return ErrorCode::InvalidRef;
        }
        if cause.is::<serde_json::Error>() || cause.is::<DiffError>() {
            return ErrorCode::InvalidRequest;
        }
        if cause.is::<std::io::Error>() {
            return ErrorCode::Io;
        }
    }
    ErrorCode::Internal
}

fn error_hint(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::InvalidRequest => {
            Some("Check the action name and payload fields (camelCase); action=capabilities lists them.")
        }
        ErrorCode::InvalidPatch => Some(
            "Patch line numbers refer to the original content; ranges must be in bounds and must not overlap.",
        ),
        ErrorCode::InvalidRef => Some("References look like owner/repo:path:start[-end]."),
        ErrorCode::ConfigError => {
            Some("Fix or remove the file given by --config / GITGATE_CONFIG.")
        }
        ErrorCode::Io | ErrorCode::Internal => None,
    }
}

// Payloads

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    /// `null` or absent is treated as empty content
    #[serde(default)]
    pub content: Option<String>,
    /// Partial `NormalizeOptions`, laid over the configured ones
    #[serde(default)]
    pub normalize: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRangePayload {
    #[serde(flatten)]
    pub content: ContentPayload,
    pub start_line: i64,
    #[serde(default)]
    pub end_line: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    #[serde(flatten)]
    pub content: ContentPayload,
    pub query: String,
    /// Partial `SearchOptions`, laid over the configured ones
    #[serde(default)]
    pub options: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    pub matches: Vec<SearchMatch>,
    pub truncated: bool,
    /// Why the query matched nothing, when it could not be compiled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchPayload {
    #[serde(flatten)]
    pub content: ContentPayload,
    pub patches: Vec<LinePatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolsPayload {
    #[serde(default)]
    pub content: Option<String>,
    pub path: String,
    #[serde(flatten)]
    pub query: SymbolQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolsOutput {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    #[serde(default)]
    pub content: Option<String>,
    pub path: String,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportsOutput {
    pub path: String,
    pub imports: Vec<ImportRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportsOutput {
    pub path: String,
    pub exports: Vec<Symbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencesPayload {
    #[serde(default)]
    pub content: Option<String>,
    pub path: String,
    pub symbol: String,
    #[serde(default = "default_reference_context")]
    pub context_lines: usize,
}

fn default_reference_context() -> usize {
    DEFAULT_REFERENCE_CONTEXT
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencesOutput {
    pub symbol: String,
    pub references: Vec<Reference>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraphPayload {
    pub files: Vec<SourceFile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraphOutput {
    #[serde(flatten)]
    pub graph: DependencyGraph,
    pub stats: GraphStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRefPayload {
    #[serde(rename = "ref")]
    pub reference: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftPayload {
    pub reference_sha: String,
    pub current_sha: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffPayload {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    /// Partial `DiffLimits`, laid over the configured ones
    #[serde(default)]
    pub limits: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_errors_classify_as_invalid_request() {
        let err = parse_payload::<DriftPayload>(CommandAction::Drift, json!({ "referenceSha": 1 }))
            .unwrap_err();
        assert_eq!(classify_error(&err), ErrorCode::InvalidRequest);
        assert!(format!("{err:#}").contains("Invalid payload for action 'drift'"));
    }

    #[test]
    fn typed_errors_keep_their_codes() {
        let err = anyhow::Error::from(PatchError::Empty).context("patch failed");
        assert_eq!(classify_error(&err), ErrorCode::InvalidPatch);

        let err = anyhow::Error::from(ReferenceError::InvalidLine("x".into()));
        assert_eq!(classify_error(&err), ErrorCode::InvalidRef);

        let err = anyhow::Error::from(DiffError::ZeroLimit("maxLcsLines")).context("limits");
        assert_eq!(classify_error(&err), ErrorCode::InvalidRequest);

        let err = anyhow::anyhow!("boom");
        assert_eq!(classify_error(&err), ErrorCode::Internal);
    }

    #[test]
    fn action_names_round_trip() {
        for action in CommandAction::ALL {
            let value = serde_json::to_value(action).unwrap();
            assert_eq!(value, json!(action.as_str()));
        }
    }
}
