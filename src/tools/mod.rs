//! Tool handler registry for managing MCP tool implementations.
//!
//! This module provides a simple way to register and invoke tool handlers,
//! making it easy to add new tools without modifying the core `ServerHandler`
//! implementation.

pub mod contract;
pub mod pagination;
mod registry;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use contract::ToolError;
pub use registry::{DispatchError, ToolContext, ToolFuture, ToolHandler, ToolRegistry};
pub use schema::ToolDefinition;

// Tool handler implementations
mod get_apply_details;
mod get_apply_logs;
mod get_plan_details;
mod get_plan_json_output;
mod get_plan_logs;
mod list_runs;

pub use get_apply_details::GetApplyDetailsHandler;
pub use get_apply_logs::GetApplyLogsHandler;
pub use get_plan_details::GetPlanDetailsHandler;
pub use get_plan_json_output::GetPlanJsonOutputHandler;
pub use get_plan_logs::GetPlanLogsHandler;
pub use list_runs::{ListRunsHandler, RUN_STATUSES};

impl ToolRegistry {
    /// Register every built-in Terraform tool.
    pub fn with_default_tools(self) -> Self {
        self.register_handler(GetPlanDetailsHandler::new())
            .register_handler(GetPlanLogsHandler::new())
            .register_handler(GetPlanJsonOutputHandler::new())
            .register_handler(GetApplyDetailsHandler::new())
            .register_handler(GetApplyLogsHandler::new())
            .register_handler(ListRunsHandler::new())
    }
}
