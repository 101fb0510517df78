//! Handler for the `list_runs` tool.
//!
//! Lists runs in one workspace when `workspace_name` is given, otherwise
//! across the whole organization.

use rmcp::model::JsonObject;
use tracing::debug;

use crate::client::RunListOptions;
use crate::tools::contract::{
    ToolError, encode_page, optional_string, optional_string_list, require_string,
};
use crate::tools::pagination::Pagination;
use crate::tools::registry::{ToolContext, ToolFuture, ToolHandler};
use crate::tools::schema::{ParamKind, ToolDefinition, ToolParam};
use crate::types::{OrganizationName, WorkspaceName};

/// Run statuses accepted by the `status` filter.
pub const RUN_STATUSES: &[&str] = &[
    "pending",
    "fetching",
    "fetching_completed",
    "pre_plan_running",
    "pre_plan_completed",
    "queuing",
    "plan_queued",
    "planning",
    "planned",
    "cost_estimating",
    "cost_estimated",
    "policy_checking",
    "policy_override",
    "policy_soft_failed",
    "policy_checked",
    "confirmed",
    "post_plan_running",
    "post_plan_completed",
    "planned_and_finished",
    "planned_and_saved",
    "apply_queued",
    "applying",
    "applied",
    "discarded",
    "errored",
    "canceled",
    "force_canceled",
];

pub struct ListRunsHandler {
    definition: ToolDefinition,
}

impl ListRunsHandler {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::read_only(
                "list_runs",
                "List Terraform runs",
                "List or search Terraform runs in a specific workspace with optional filtering.",
            )
            .params([
                ToolParam::required(
                    "terraform_org_name",
                    "Lists the runs in Terraform Cloud/Enterprise organization based on filters if no workspace is specified",
                    ParamKind::String,
                ),
                ToolParam::optional(
                    "workspace_name",
                    "If specified, lists the runs in the given workspace instead of the organization based on filters",
                    ParamKind::String,
                ),
                ToolParam::optional(
                    "vcs_username",
                    "Searches for runs that match the VCS username you supply",
                    ParamKind::String,
                ),
                ToolParam::optional(
                    "status",
                    "Optional run status filter",
                    ParamKind::StringArray(Some(RUN_STATUSES)),
                ),
            ])
            .params(Pagination::params()),
        }
    }
}

impl Default for ListRunsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for ListRunsHandler {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a> {
        Box::pin(async move {
            let org = OrganizationName::new(require_string(&args, "terraform_org_name")?.trim());
            let workspace = optional_string(&args, "workspace_name")?
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .map(WorkspaceName::new);
            let user = optional_string(&args, "vcs_username")?;
            let statuses = optional_string_list(&args, "status", Some(RUN_STATUSES))?;
            let pagination = Pagination::from_args(&args)?;

            let options = RunListOptions {
                page_number: pagination.page,
                page_size: pagination.page_size,
                status: (!statuses.is_empty()).then(|| statuses.join(",")),
                user,
            };

            let client = ctx.tfe_client()?;

            let page = match workspace {
                Some(workspace) => {
                    debug!(org = %org, workspace = %workspace, "listing workspace runs");
                    let ws = ctx
                        .cancellable(client.read_workspace(&org, &workspace))
                        .await?
                        .map_err(|e| {
                            ToolError::remote(
                                format!("workspace '{}' not found in org '{}'", workspace, org),
                                &e,
                            )
                        })?;
                    ctx.cancellable(client.list_runs(&ws.id, &options))
                        .await?
                        .map_err(|e| ToolError::remote("failed to list runs in workspace", &e))?
                }
                None => {
                    debug!(org = %org, "listing organization runs");
                    ctx.cancellable(client.list_runs_for_organization(&org, &options))
                        .await?
                        .map_err(|e| {
                            ToolError::remote(format!("failed to list runs in org '{}'", org), &e)
                        })?
                }
            };

            encode_page("runs", page)
        })
    }
}
