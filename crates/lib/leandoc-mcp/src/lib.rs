//! MCP server implementation for leandoc-mcp.
//!
//! This crate wires the control plane into rmcp tool handlers and exposes the
//! MCP-facing API surface for searching Mathlib 4 declarations.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use leandoc_core::control::{LeanDocControlPlane, LeanDocTool};
use rmcp::{
    ErrorData,
    RoleServer,
    ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::{
        CallToolRequestParams,
        CallToolResult,
        Implementation,
        ListToolsResult,
        PaginatedRequestParams,
        ServerCapabilities,
        ServerInfo,
        Tool,
    },
    service::RequestContext,
};
use tracing::warn;

pub use tools::search::SearchLeanDocParams;

pub const SERVER_NAME: &str = "Lean Mathlib 4 Doc Search MCP Server";

const SERVER_INSTRUCTIONS: &str = r"leandoc-mcp searches the Lean Mathlib 4 declaration index.

Call `search_lean_doc` with `queries`, a list of name fragments. Matching is a case-insensitive
substring test on declaration names, so `add_comm` finds `add_comm` and `Nat.add_comm`.
Each hit comes back as its own text block with the declaration name, its kind and a link to
its documentation page. Results are grouped by query in the order given and capped per query.

The declaration index is downloaded on first use and reused afterwards.";

/// MCP server wrapper around the control plane and tool router.
#[derive(Clone)]
pub struct LeanDocMcp {
    tool_router: ToolRouter<Self>,
    control: Arc<LeanDocControlPlane>,
}

impl LeanDocMcp {
    /// Creates a new server owning its control plane.
    #[must_use]
    pub fn new(control: LeanDocControlPlane) -> Self {
        Self::with_control(Arc::new(control))
    }

    /// Creates a new server using a shared control plane handle.
    #[must_use]
    pub fn with_control(control: Arc<LeanDocControlPlane>) -> Self {
        Self {
            tool_router: Self::tool_router_search(),
            control,
        }
    }
}

impl ServerHandler for LeanDocMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if let Err(err) = LeanDocTool::resolve(&request.name) {
            warn!(tool = %request.name, "rejected call to unregistered tool");
            return Err(helpers::map_control_err(&err));
        }
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            meta: None,
            next_cursor: None,
        })
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tool_router.get(name).cloned()
    }
}
