//! Handler for the `get_apply_details` tool.

use rmcp::model::JsonObject;
use tracing::debug;

use crate::tools::contract::{ToolError, encode_resource, require_string};
use crate::tools::registry::{ToolContext, ToolFuture, ToolHandler};
use crate::tools::schema::{ParamKind, ToolDefinition, ToolParam};
use crate::types::ApplyId;

/// Fetches a single apply resource.
pub struct GetApplyDetailsHandler {
    definition: ToolDefinition,
}

impl GetApplyDetailsHandler {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::read_only(
                "get_apply_details",
                "Get detailed information about a Terraform apply",
                "Fetches detailed information about a specific Terraform apply.",
            )
            .param(ToolParam::required(
                "apply_id",
                "The ID of the apply to get details for",
                ParamKind::String,
            )),
        }
    }
}

impl Default for GetApplyDetailsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for GetApplyDetailsHandler {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let apply_id = ApplyId::new(require_string(&args, "apply_id")?);
            let client = ctx.tfe_client()?;

            debug!(apply_id = %apply_id, "reading apply");
            let apply = ctx
                .cancellable(client.read_apply(&apply_id))
                .await?
                .map_err(|e| ToolError::remote(format!("apply not found: {}", apply_id), &e))?;

            encode_resource("apply", apply)
        })
    }
}
