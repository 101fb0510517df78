//! Handler for the `get_plan_logs` tool.

use rmcp::model::JsonObject;
use tracing::debug;

use crate::tools::contract::{ToolError, require_string};
use crate::tools::registry::{ToolContext, ToolFuture, ToolHandler};
use crate::tools::schema::{ParamKind, ToolDefinition, ToolParam};
use crate::types::PlanId;

/// Returns the raw log output of a plan.
pub struct GetPlanLogsHandler {
    definition: ToolDefinition,
}

impl GetPlanLogsHandler {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::read_only(
                "get_plan_logs",
                "Get logs for a Terraform plan",
                "Retrieves the logs of a specific Terraform plan.",
            )
            .param(ToolParam::required(
                "plan_id",
                "The ID of the plan to get logs for",
                ParamKind::String,
            )),
        }
    }
}

impl Default for GetPlanLogsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for GetPlanLogsHandler {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let plan_id = PlanId::new(require_string(&args, "plan_id")?);
            let client = ctx.tfe_client()?;

            debug!(plan_id = %plan_id, "reading plan logs");
            ctx.cancellable(client.read_plan_logs(&plan_id))
                .await?
                .map_err(|e| {
                    ToolError::remote(format!("failed to retrieve plan logs: {}", plan_id), &e)
                })
        })
    }
}
