use crate::{mcp::SERVER_NAME, AppState, McpError, McpResult};
use pplx_protocol_adapter::{mcp as adapter_mcp, InvokeRequest};
use rmcp::{
    handler::server::ServerHandler,
    model as m,
    service::{serve_server, RequestContext, RoleServer},
    ErrorData,
};
use std::future::Future;
use tracing::{debug, info};

/// Single-client adapter: exposes the dispatcher's catalog and calls over rmcp.
#[derive(Clone)]
pub struct PerplexityMcpServer {
    state: AppState,
}

impl PerplexityMcpServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn tool_list(&self) -> m::ListToolsResult {
        let tools: Vec<m::Tool> = self
            .state
            .dispatcher
            .registry()
            .specs()
            .iter()
            .map(adapter_mcp::to_mcp_tool)
            .collect();
        m::ListToolsResult { tools, next_cursor: None }
    }

    pub async fn call(&self, name: &str, arguments: Option<m::JsonObject>) -> m::CallToolResult {
        debug!("stdio call: {}", name);
        let args = arguments.map(serde_json::Value::Object);
        let result = self.state.dispatcher.dispatch(InvokeRequest::new(name, args)).await;
        adapter_mcp::to_mcp_call_result(&result)
    }
}

impl ServerHandler for PerplexityMcpServer {
    fn get_info(&self) -> m::ServerInfo {
        let mut server_info = m::Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();
        m::ServerInfo {
            capabilities: m::ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(
                "Perplexity tools: perplexity_ask, perplexity_research and perplexity_reason. \
                 Each takes a 'messages' array of {role, content} objects."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<m::PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<m::ListToolsResult, ErrorData>> + Send + '_ {
        async move { Ok(self.tool_list()) }
    }

    fn call_tool(
        &self,
        request: m::CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<m::CallToolResult, ErrorData>> + Send + '_ {
        async move { Ok(self.call(&request.name, request.arguments).await) }
    }
}

/// Serve MCP over stdio until the client disconnects
pub async fn serve_stdio(state: AppState) -> McpResult<()> {
    info!("Perplexity MCP server running on stdio with Ask, Research, and Reason tools");
    let server = PerplexityMcpServer::new(state);
    let running = serve_server(server, (tokio::io::stdin(), tokio::io::stdout()))
        .await
        .map_err(|e| McpError::Transport(format!("rmcp init error: {}", e)))?;
    let reason = running
        .waiting()
        .await
        .map_err(|e| McpError::Internal(format!("stdio service join error: {}", e)))?;
    info!("MCP server stopped: {:?}", reason);
    Ok(())
}
