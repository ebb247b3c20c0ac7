use crate::command::context::CommandContext;
use crate::command::domain::{parse_payload, CommandAction, CommandOutcome, DiffPayload};
use anyhow::{Context, Result};
use gitgate_diff::compute_line_diff_with;
use gitgate_protocol::Truncation;
use serde_json::Value;

pub(crate) struct DiffService;

impl DiffService {
    pub fn run(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: DiffPayload = parse_payload(CommandAction::Diff, payload)?;
        let limits = ctx.diff_limits(payload.limits.as_ref())?;
        limits.validate().context("Invalid diff limits")?;

        let result = compute_line_diff_with(
            payload.source.as_deref(),
            payload.target.as_deref(),
            &limits,
        );
        let truncation = if result.note.is_some() {
            Some(Truncation::SetSummary)
        } else if result.truncated {
            Some(Truncation::MaxOutputLines)
        } else {
            None
        };
        Ok(CommandOutcome::from_value(result)?.with_truncation(truncation))
    }
}
