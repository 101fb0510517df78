//! Handler for the `get_plan_json_output` tool.

use rmcp::model::JsonObject;
use tracing::debug;

use crate::tools::contract::{ToolError, require_string};
use crate::tools::registry::{ToolContext, ToolFuture, ToolHandler};
use crate::tools::schema::{ParamKind, ToolDefinition, ToolParam};
use crate::types::PlanId;

/// Returns the JSON execution plan, verbatim.
pub struct GetPlanJsonOutputHandler {
    definition: ToolDefinition,
}

impl GetPlanJsonOutputHandler {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::read_only(
                "get_plan_json_output",
                "Get JSON output for a Terraform plan",
                "Retrieves the structured JSON output of a specific Terraform plan. \
                 This includes detailed information about resource changes (create, update, \
                 delete), attribute values before and after, and plan metadata. This is more \
                 structured and easier to parse than plain logs.",
            )
            .param(ToolParam::required(
                "plan_id",
                "The ID of the plan to get JSON output for",
                ParamKind::String,
            )),
        }
    }
}

impl Default for GetPlanJsonOutputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for GetPlanJsonOutputHandler {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let plan_id = PlanId::new(require_string(&args, "plan_id")?);
            let client = ctx.tfe_client()?;

            debug!(plan_id = %plan_id, "reading plan JSON output");
            ctx.cancellable(client.read_plan_json_output(&plan_id))
                .await?
                .map_err(|e| {
                    ToolError::remote(
                        format!("failed to retrieve plan JSON output: {}", plan_id),
                        &e,
                    )
                })
        })
    }
}
