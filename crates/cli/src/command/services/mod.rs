mod analysis;
mod capabilities;
mod content;
mod diff;
mod reference;

use crate::command::context::CommandContext;
use crate::command::domain::{CommandAction, CommandOutcome};
use anyhow::Result;
use serde_json::Value;

pub struct Services {
    analysis: analysis::AnalysisService,
    capabilities: capabilities::CapabilitiesService,
    content: content::ContentService,
    diff: diff::DiffService,
    reference: reference::ReferenceService,
}

impl Services {
    pub fn new() -> Self {
        Self {
            analysis: analysis::AnalysisService,
            capabilities: capabilities::CapabilitiesService,
            content: content::ContentService,
            diff: diff::DiffService,
            reference: reference::ReferenceService,
        }
    }

    pub fn route(
        &self,
        action: CommandAction,
        payload: Value,
        ctx: &CommandContext,
    ) -> Result<CommandOutcome> {
        match action {
            CommandAction::Normalize => self.content.normalize(payload, ctx),
            CommandAction::LineMap => self.content.line_map(payload, ctx),
            CommandAction::LineRange => self.content.line_range(payload, ctx),
            CommandAction::Search => self.content.search(payload, ctx),
            CommandAction::Patch => self.content.patch(payload, ctx),
            CommandAction::Symbols => self.analysis.symbols(payload),
            CommandAction::Imports => self.analysis.imports(payload),
            CommandAction::Exports => self.analysis.exports(payload),
            CommandAction::References => self.analysis.references(payload),
            CommandAction::DependencyGraph => self.analysis.dependency_graph(payload),
            CommandAction::LineReference => self.reference.line_reference(payload, ctx),
            CommandAction::ParseRef => self.reference.parse_ref(payload),
            CommandAction::Drift => self.reference.drift(payload),
            CommandAction::Diff => self.diff.run(payload, ctx),
            CommandAction::Languages => self.capabilities.languages(),
            CommandAction::Capabilities => self.capabilities.run(ctx),
        }
    }
}
