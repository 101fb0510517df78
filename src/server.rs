//! MCP server implementation using rmcp.
//!
//! Lists and dispatches the enabled Terraform tools over stdio or streamable
//! HTTP.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::ClientProvider;
use crate::tools::{ToolContext, ToolRegistry};

/// MCP server that handles protocol requests and delegates to tool handlers.
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    clients: Arc<dyn ClientProvider>,
}

impl McpServer {
    pub fn new(tool_registry: Arc<ToolRegistry>, clients: Arc<dyn ClientProvider>) -> Self {
        Self {
            tool_registry,
            clients,
        }
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    fn context(&self, context: &RequestContext<RoleServer>) -> ToolContext {
        ToolContext::new(self.clients.clone(), context.ct.clone())
    }
}

impl ServerHandler for McpServer {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let result = ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
            ..Default::default()
        };
        std::future::ready(Ok(result))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let tool_name = request.name.to_string();
        let args = request.arguments.unwrap_or_default();
        let ctx = self.context(&context);

        async move {
            self.tool_registry
                .call_tool(&tool_name, args, &ctx)
                .await
                .map_err(|e| e.to_mcp_error())
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Terraform MCP server exposing read-only tools for HCP Terraform and \
                 Terraform Enterprise plans, applies and runs."
                    .to_string(),
            ),
        }
    }
}

/// Serve MCP over streamable HTTP.
///
/// This exposes the MCP endpoint at `/mcp` on the given bind address,
/// e.g. `127.0.0.1:8080`.
pub async fn start_mcp_http(server: Arc<McpServer>, bind: &str) -> Result<()> {
    let service = StreamableHttpService::new(
        {
            let server = server.clone();
            move || Ok(server.as_ref().clone())
        },
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = Router::new()
        .nest_service("/mcp", service)
        .layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!(
        bind = %bind,
        enablement = %server.tool_registry().enablement(),
        "MCP HTTP server listening on http://{}/mcp",
        bind
    );

    axum::serve(listener, router).await?;
    Ok(())
}
