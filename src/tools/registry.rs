//! Tool registry for managing MCP tool handlers.
//!
//! Provides a `ToolHandler` trait for implementing tools and a `ToolRegistry`
//! that lists and invokes them, gated by the session's [`Enablement`].

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, JsonObject, Tool as McpTool};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::contract::{ToolError, into_call_result};
use super::schema::ToolDefinition;
use crate::client::{ClientProvider, TfeApi};
use crate::toolsets::{Enablement, ToolsetRegistry};

/// Boxed future returned by [`ToolHandler::execute`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>>;

/// Context passed to tool handlers during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Cancelled when the client abandons the request.
    pub cancellation: CancellationToken,
    clients: Arc<dyn ClientProvider>,
}

impl ToolContext {
    pub fn new(clients: Arc<dyn ClientProvider>, cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            clients,
        }
    }

    /// The API client for this request.
    pub fn tfe_client(&self) -> Result<Arc<dyn TfeApi>, ToolError> {
        self.clients
            .client()
            .map_err(|e| ToolError::ClientUnavailable(e.0))
    }

    /// Run `fut` unless the request is cancelled first.
    pub async fn cancellable<F: Future>(&self, fut: F) -> Result<F::Output, ToolError> {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(ToolError::Cancelled),
            output = fut => Ok(output),
        }
    }
}

/// Trait for handling MCP tool invocations.
///
/// Each tool implements this trait to define its schema and execution logic.
/// `execute` returns the encoded payload; the registry turns it into the
/// protocol result.
pub trait ToolHandler: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    fn name(&self) -> &str {
        self.definition().name
    }

    fn execute<'a>(&'a self, args: JsonObject, ctx: &'a ToolContext) -> ToolFuture<'a>;

    /// Converts this handler to an `McpTool` for use in `list_tools`.
    fn to_mcp_tool(&self) -> McpTool {
        self.definition().to_mcp_tool()
    }
}

/// Why a tool call was refused before reaching a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The tool exists (or might) but is not enabled for this session.
    NotEnabled(String),
    /// The tool is enabled but no handler is registered for it.
    NotFound(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnabled(name) => write!(f, "tool '{}' is disabled or unknown", name),
            Self::NotFound(name) => write!(f, "Tool not found: {}", name),
        }
    }
}

impl std::error::Error for DispatchError {}

impl DispatchError {
    /// Convert to an MCP invalid-params error.
    pub fn to_mcp_error(&self) -> McpError {
        McpError::invalid_params(self.to_string(), None)
    }
}

/// Registry for managing tool handlers.
#[derive(Clone)]
pub struct ToolRegistry {
    handlers: BTreeMap<String, Arc<dyn ToolHandler>>,
    toolsets: Arc<ToolsetRegistry>,
    enablement: Enablement,
}

impl ToolRegistry {
    /// Create an empty registry that filters by `enablement`.
    pub fn new(toolsets: Arc<ToolsetRegistry>, enablement: Enablement) -> Self {
        Self {
            handlers: BTreeMap::new(),
            toolsets,
            enablement,
        }
    }

    /// Register a tool handler.
    pub fn register(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        if !self.toolsets.contains(handler.name()) {
            warn!(
                tool = handler.name(),
                "tool is not in any toolset; it is only reachable when all tools are enabled"
            );
        }
        self.handlers.insert(handler.name().to_string(), handler);
        self
    }

    /// Register a tool handler from a type that implements `ToolHandler`.
    pub fn register_handler<T: ToolHandler + 'static>(self, handler: T) -> Self {
        self.register(Arc::new(handler))
    }

    /// Get a tool handler by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn enablement(&self) -> &Enablement {
        &self.enablement
    }

    pub fn toolsets(&self) -> &Arc<ToolsetRegistry> {
        &self.toolsets
    }

    /// Check if `name` may be listed and called in this session.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enablement.allows(&self.toolsets, name)
    }

    /// Names of all registered handlers, enabled or not, sorted.
    pub fn list_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Enabled tools as `McpTool` instances for `list_tools`, sorted by name.
    pub fn list_tools(&self) -> Vec<McpTool> {
        self.handlers
            .values()
            .filter(|handler| self.is_enabled(handler.name()))
            .map(|handler| handler.to_mcp_tool())
            .collect()
    }

    /// Execute a tool by name with the given arguments.
    ///
    /// Disabled tools are refused before their handler runs. Handler
    /// failures come back as `is_error` results, not as `Err`.
    pub async fn call_tool(
        &self,
        name: &str,
        args: JsonObject,
        ctx: &ToolContext,
    ) -> Result<CallToolResult, DispatchError> {
        if !self.is_enabled(name) {
            warn!(tool = %name, enablement = %self.enablement, "refusing call to disabled tool");
            return Err(DispatchError::NotEnabled(name.to_string()));
        }
        if matches!(self.enablement, Enablement::All) && !self.toolsets.contains(name) {
            debug!(tool = %name, "unregistered tool name allowed because all tools are enabled");
        }

        let handler = self
            .get(name)
            .ok_or_else(|| DispatchError::NotFound(name.to_string()))?;

        debug!(tool = %name, "executing tool");
        let outcome = handler.execute(args, ctx).await;
        Ok(into_call_result(name, outcome))
    }

    /// Check if a tool with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Return the number of registered tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Return `true` if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
