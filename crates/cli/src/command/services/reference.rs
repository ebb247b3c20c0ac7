use crate::command::context::CommandContext;
use crate::command::domain::{parse_payload, CommandAction, CommandOutcome, DriftPayload, ParseRefPayload};
use anyhow::{Context, Result};
use gitgate_reference::{build_line_reference_with, check_drift, parse_ref, LineReferenceInput};
use serde_json::Value;

pub(crate) struct ReferenceService;

impl ReferenceService {
    pub fn line_reference(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let input: LineReferenceInput = parse_payload(CommandAction::LineReference, payload)?;
        CommandOutcome::from_value(build_line_reference_with(&input, ctx.reference()))
    }

    pub fn parse_ref(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: ParseRefPayload = parse_payload(CommandAction::ParseRef, payload)?;
        let locator = parse_ref(&payload.reference)
            .with_context(|| format!("Cannot parse reference {:?}", payload.reference))?;
        CommandOutcome::from_value(locator)
    }

    pub fn drift(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: DriftPayload = parse_payload(CommandAction::Drift, payload)?;
        CommandOutcome::from_value(check_drift(&payload.reference_sha, &payload.current_sha))
    }
}
