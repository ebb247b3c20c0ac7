use crate::command::context::CommandContext;
use crate::command::domain::{
    parse_payload, CommandAction, CommandOutcome, ContentPayload, LineRangePayload, PatchPayload,
    SearchOutput, SearchPayload,
};
use anyhow::{Context, Result};
use gitgate_content::{
    apply_line_patches, compute_line_map, extract_line_range, normalize_optional,
    try_search_content, NormalizedContent, SearchResults,
};
use gitgate_protocol::Truncation;
use serde::Serialize;
use serde_json::Value;

pub(crate) struct ContentService;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NormalizeOutput {
    content: NormalizedContent,
    total_lines: usize,
}

impl ContentService {
    pub fn normalize(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: ContentPayload = parse_payload(CommandAction::Normalize, payload)?;
        let content = normalize_payload(&payload, ctx)?;
        let total_lines = compute_line_map(&content).len();
        CommandOutcome::from_value(NormalizeOutput {
            content,
            total_lines,
        })
    }

    pub fn line_map(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: ContentPayload = parse_payload(CommandAction::LineMap, payload)?;
        let content = normalize_payload(&payload, ctx)?;
        let lines = compute_line_map(&content);
        CommandOutcome::from_value(serde_json::json!({
            "totalLines": lines.len(),
            "lines": lines,
        }))
    }

    pub fn line_range(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: LineRangePayload = parse_payload(CommandAction::LineRange, payload)?;
        let content = normalize_payload(&payload.content, ctx)?;
        CommandOutcome::from_value(extract_line_range(
            &content,
            payload.start_line,
            payload.end_line,
        ))
    }

    pub fn search(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: SearchPayload = parse_payload(CommandAction::Search, payload)?;
        let options = ctx.search_options(payload.options.as_ref())?;
        let content = normalize_payload(&payload.content, ctx)?;

        let (results, warning) = match try_search_content(&content, &payload.query, &options) {
            Ok(results) => (results, None),
            Err(err) => {
                log::debug!("search query rejected: {err}");
                (SearchResults::default(), Some(err.to_string()))
            }
        };
        let truncated = results.truncated;

        CommandOutcome::from_value(SearchOutput {
            matches: results.matches,
            truncated,
            warning,
        })
        .map(|outcome| outcome.with_truncation(truncated.then_some(Truncation::MaxResults)))
    }

    pub fn patch(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: PatchPayload = parse_payload(CommandAction::Patch, payload)?;
        let content = normalize_payload(&payload.content, ctx)?;
        let outcome = apply_line_patches(&content, &payload.patches)
            .with_context(|| format!("Failed to apply {} patch(es)", payload.patches.len()))?;
        log::debug!(
            "patched content: +{} -{} lines",
            outcome.lines_added,
            outcome.lines_removed
        );
        CommandOutcome::from_value(outcome)
    }
}

fn normalize_payload(payload: &ContentPayload, ctx: &CommandContext) -> Result<NormalizedContent> {
    let options = ctx.normalize_options(payload.normalize.as_ref())?;
    Ok(normalize_optional(payload.content.as_deref(), &options))
}
