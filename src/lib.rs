//! MCP server exposing HCP Terraform / Terraform Enterprise tools, grouped
//! into toolsets that operators enable per deployment.

pub mod client;
pub mod config;
pub mod server;
pub mod tools;
pub mod toolsets;
pub mod types;

// Re-export key types and functions
pub use config::{ResolvedEnablement, ServerConfig};
pub use server::McpServer;
pub use tools::{ToolHandler, ToolRegistry};
pub use toolsets::{Enablement, Toolset, ToolsetRegistry};

use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use client::StaticClientProvider;

/// Convenience function to create a fully configured MCP server.
///
/// Resolves enablement from `config`, registers the default tools and
/// builds the API client. Rejected tool or toolset names are logged and
/// skipped.
pub fn create_server(config: &ServerConfig) -> Result<Arc<McpServer>> {
    let toolsets = Arc::new(ToolsetRegistry::builtin());

    let resolved = config.resolve_enablement(&toolsets);
    if !resolved.rejected.is_empty() {
        warn!(
            rejected = ?resolved.rejected,
            "ignoring unknown tool or toolset names"
        );
    }

    let tool_registry = ToolRegistry::new(toolsets, resolved.enablement).with_default_tools();
    let clients = StaticClientProvider::from_config(config.client_config()?)?;

    Ok(Arc::new(McpServer::new(
        Arc::new(tool_registry),
        Arc::new(clients),
    )))
}
