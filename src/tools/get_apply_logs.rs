//! Handler for the `get_apply_logs` tool.

use rmcp::model::JsonObject;
use tracing::debug;

use crate::tools::contract::{ToolError, require_string};
use crate::tools::registry::{ToolContext, ToolFuture, ToolHandler};
use crate::tools::schema::{ParamKind, ToolDefinition, ToolParam};
use crate::types::ApplyId;

/// Returns the raw log output of an apply.
pub struct GetApplyLogsHandler {
    definition: ToolDefinition,
}

impl GetApplyLogsHandler {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::read_only(
                "get_apply_logs",
                "Get logs for a Terraform apply",
                "Retrieves the logs of a specific Terraform apply.",
            )
            .param(ToolParam::required(
                "apply_id",
                "The ID of the apply to get logs for",
                ParamKind::String,
            )),
        }
    }
}

impl Default for GetApplyLogsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for GetApplyLogsHandler {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let apply_id = ApplyId::new(require_string(&args, "apply_id")?);
            let client = ctx.tfe_client()?;

            debug!(apply_id = %apply_id, "reading apply logs");
            ctx.cancellable(client.read_apply_logs(&apply_id))
                .await?
                .map_err(|e| {
                    ToolError::remote(format!("failed to retrieve apply logs: {}", apply_id), &e)
                })
        })
    }
}
