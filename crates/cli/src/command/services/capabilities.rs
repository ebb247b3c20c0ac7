use crate::command::context::CommandContext;
use crate::command::domain::{CommandAction, CommandOutcome};
use anyhow::Result;
use gitgate_protocol::{
    Capabilities, CapabilitiesServer, DefaultLimits, LanguageInfo, CAPABILITIES_SCHEMA_VERSION,
    COMMAND_API_VERSION,
};
use gitgate_symbols::Language;
use serde_json::json;

pub(crate) struct CapabilitiesService;

impl CapabilitiesService {
    pub fn languages(&self) -> Result<CommandOutcome> {
        CommandOutcome::from_value(json!({ "languages": language_infos() }))
    }

    pub fn run(&self, ctx: &CommandContext) -> Result<CommandOutcome> {
        let config = ctx.config();
        let output = Capabilities {
            schema_version: CAPABILITIES_SCHEMA_VERSION,
            server: CapabilitiesServer {
                name: "gitgate".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            command_api: COMMAND_API_VERSION.to_string(),
            actions: CommandAction::ALL
                .iter()
                .map(|action| action.as_str().to_string())
                .collect(),
            languages: language_infos(),
            default_limits: DefaultLimits {
                max_results: config.search.max_results,
                context_lines: config.search.context_lines,
                max_lcs_lines: config.diff.max_lcs_lines,
                max_lcs_cells: config.diff.max_lcs_cells,
                max_diff_output_lines: config.diff.max_output_lines,
            },
            web_base: ctx.reference().base().to_string(),
        };

        CommandOutcome::from_value(output)
    }
}

fn language_infos() -> Vec<LanguageInfo> {
    Language::ALL
        .into_iter()
        .map(|language| LanguageInfo {
            name: language.as_str().to_string(),
            extensions: language
                .extensions()
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        })
        .collect()
}
