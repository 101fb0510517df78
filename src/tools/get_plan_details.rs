//! Handler for the `get_plan_details` tool.

use rmcp::model::JsonObject;
use tracing::debug;

use crate::tools::contract::{ToolError, encode_resource, require_string};
use crate::tools::registry::{ToolContext, ToolFuture, ToolHandler};
use crate::tools::schema::{ParamKind, ToolDefinition, ToolParam};
use crate::types::PlanId;

/// Fetches a single plan resource.
pub struct GetPlanDetailsHandler {
    definition: ToolDefinition,
}

impl GetPlanDetailsHandler {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::read_only(
                "get_plan_details",
                "Get detailed information about a Terraform plan",
                "Fetches detailed information about a specific Terraform plan.",
            )
            .param(ToolParam::required(
                "plan_id",
                "The ID of the plan to get details for",
                ParamKind::String,
            )),
        }
    }
}

impl Default for GetPlanDetailsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for GetPlanDetailsHandler {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let plan_id = PlanId::new(require_string(&args, "plan_id")?);
            let client = ctx.tfe_client()?;

            debug!(plan_id = %plan_id, "reading plan");
            let plan = ctx
                .cancellable(client.read_plan(&plan_id))
                .await?
                .map_err(|e| ToolError::remote(format!("plan not found: {}", plan_id), &e))?;

            encode_resource("plan", plan)
        })
    }
}
