mod context;
pub mod domain;
mod services;

pub use domain::{CommandAction, CommandRequest, CommandResponse, ResponseMeta};

use crate::config::LoadedConfig;
use anyhow::{Context, Result};
use context::CommandContext;
use domain::{CommandOutcome, CommandStatus};
use gitgate_protocol::ErrorCode;
use services::Services;
use std::time::Instant;

pub struct CommandHandler {
    services: Services,
    ctx: CommandContext,
}

impl CommandHandler {
    pub fn new(config: LoadedConfig) -> Self {
        Self {
            services: Services::new(),
            ctx: CommandContext::new(config),
        }
    }

    pub fn execute(&self, request: CommandRequest) -> CommandResponse {
        let started = Instant::now();
        let CommandRequest { action, payload } = request;
        log::debug!("command action={}", action.as_str());

        let outcome: Result<CommandOutcome> = self.services.route(action, payload, &self.ctx);

        let meta = ResponseMeta {
            action: Some(action),
            config_path: self.ctx.config_path().map(str::to_string),
            duration_ms: Some(started.elapsed().as_millis() as u64),
            ..Default::default()
        };

        match outcome {
            Ok(outcome) => CommandResponse {
                status: CommandStatus::Ok,
                message: None,
                error: None,
                data: outcome.data,
                meta: ResponseMeta {
                    truncation: outcome.truncation,
                    ..meta
                },
            },
            Err(err) => {
                log::debug!("command {} failed: {err:#}", action.as_str());
                CommandResponse::error(&err, meta)
            }
        }
    }

    /// Parse and run one raw JSON request
    pub fn execute_raw(&self, raw: &str) -> CommandResponse {
        match parse_request(raw) {
            Ok(request) => self.execute(request),
            Err(err) => CommandResponse::error_with_code(
                &err,
                ErrorCode::InvalidRequest,
                ResponseMeta {
                    config_path: self.ctx.config_path().map(str::to_string),
                    ..Default::default()
                },
            ),
        }
    }
}

pub fn parse_request(raw: &str) -> Result<CommandRequest> {
    serde_json::from_str(raw).context("Failed to parse command request JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_action_is_an_invalid_request() {
        let handler = CommandHandler::new(LoadedConfig::default());
        let response = handler.execute_raw(r#"{ "action": "reindex", "payload": {} }"#);
        assert!(response.is_error());
        assert_eq!(response.error.unwrap().code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn success_carries_action_and_truncation() {
        let request = CommandRequest {
            action: CommandAction::Search,
            payload: json!({
                "content": "a\na\na",
                "query": "a",
                "options": { "maxResults": 2 }
            }),
        };
        let response = CommandHandler::new(LoadedConfig::default()).execute(request);
        assert_eq!(response.status, CommandStatus::Ok);
        assert_eq!(response.meta.action, Some(CommandAction::Search));
        assert_eq!(response.meta.truncation, Some(gitgate_protocol::Truncation::MaxResults));
        assert_eq!(response.data["matches"].as_array().unwrap().len(), 2);
    }
}
