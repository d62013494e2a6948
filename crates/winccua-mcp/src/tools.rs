//! MCP tool definitions.
//!
//! Each tool deserializes its typed parameter record, hands it to the
//! shared `Bridge`, and returns the rendered text. Argument problems are
//! reported as `invalid_params`; backend and login failures come back as
//! tool results flagged `is_error` so the caller sees the reason.

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler};
use tracing::{error, info, warn};

use winccua_core::operations::{
    AcknowledgeAlarmsParams, BrowseObjectsParams, GetActiveAlarmsParams, GetLoggedAlarmsParams,
    GetLoggedTagValuesParams, GetTagValuesParams, LoginUserParams, ResetAlarmsParams,
    WriteTagValuesParams,
};
use winccua_core::{Bridge, Operation, ToolError};

/// Name reported in the MCP handshake
pub const SERVER_NAME: &str = "winccua-mcp";

const INSTRUCTIONS: &str = "WinCC Unified SCADA bridge. \
    Use browse-objects to discover tags, alarms and logging tags by name pattern. \
    Read live values with get-tag-values and history with get-logged-tag-values. \
    Inspect alarms with get-active-alarms and get-logged-alarms. \
    write-tag-values, acknowledge-alarms and reset-alarms change plant state. \
    login-user switches the shared session to another WinCC Unified user.";

#[derive(Clone)]
pub struct WinccToolRouter {
    bridge: Bridge,
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl WinccToolRouter {
    pub fn new(bridge: Bridge) -> Self {
        Self {
            bridge,
            tool_router: Self::tool_router(),
        }
    }

    async fn run<O: Operation>(
        &self,
        params: O,
        ctx: &RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = O::TOOL_NAME, "Tool called");
        match self.bridge.execute(&params, &ctx.ct).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => tool_failure(O::TOOL_NAME, e),
        }
    }
}

/// Map a tool failure onto the MCP surface
fn tool_failure(tool: &str, err: ToolError) -> Result<CallToolResult, McpError> {
    match err {
        ToolError::Validation(e) => {
            warn!(tool, error = %e, "Rejected tool arguments");
            Err(McpError::invalid_params(e.to_string(), None))
        }
        other => {
            error!(tool, error = %other, "Tool failed");
            Ok(CallToolResult::error(vec![Content::text(other.to_string())]))
        }
    }
}

#[tool_router]
impl WinccToolRouter {
    #[tool(
        name = "login-user",
        description = "Authenticates a user in WinCC Unified using a provided username and password. The new session replaces the current one for all subsequent tool calls."
    )]
    async fn login_user(
        &self,
        Parameters(params): Parameters<LoginUserParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "login-user", username = %params.username, "Tool called");
        match self.bridge.login(&params).await {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Logged in to WinCC Unified as '{}'.",
                params.username
            ))])),
            Err(e) => tool_failure("login-user", e),
        }
    }

    #[tool(
        name = "browse-objects",
        description = "Retrieves tags, elements, types, alarms, logging tags, and other named objects based on specified filter criteria."
    )]
    async fn browse_objects(
        &self,
        Parameters(params): Parameters<BrowseObjectsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(params, &ctx).await
    }

    #[tool(
        name = "get-tag-values",
        description = "Retrieves current tag values from WinCC Unified for the given tag names. Set directRead to read from the PLC instead of the runtime cache."
    )]
    async fn get_tag_values(
        &self,
        Parameters(params): Parameters<GetTagValuesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(params, &ctx).await
    }

    #[tool(
        name = "get-logged-tag-values",
        description = "Retrieves historical tag values from the database for the specified tags or logging tags, formatted as a table."
    )]
    async fn get_logged_tag_values(
        &self,
        Parameters(params): Parameters<GetLoggedTagValuesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(params, &ctx).await
    }

    #[tool(
        name = "get-active-alarms",
        description = "Retrieves active alarms from the specified systems."
    )]
    async fn get_active_alarms(
        &self,
        Parameters(params): Parameters<GetActiveAlarmsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(params, &ctx).await
    }

    #[tool(
        name = "get-logged-alarms",
        description = "Retrieves historical (logged) alarms from the storage system."
    )]
    async fn get_logged_alarms(
        &self,
        Parameters(params): Parameters<GetLoggedAlarmsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(params, &ctx).await
    }

    #[tool(
        name = "write-tag-values",
        description = "Updates tag values based on a provided list of TagValueInput entries, with an optional common timestamp and quality."
    )]
    async fn write_tag_values(
        &self,
        Parameters(params): Parameters<WriteTagValuesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(params, &ctx).await
    }

    #[tool(
        name = "acknowledge-alarms",
        description = "Acknowledges one or more active alarms based on their identifiers."
    )]
    async fn acknowledge_alarms(
        &self,
        Parameters(params): Parameters<AcknowledgeAlarmsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(params, &ctx).await
    }

    #[tool(
        name = "reset-alarms",
        description = "Resets one or more active alarms based on their identifiers."
    )]
    async fn reset_alarms(
        &self,
        Parameters(params): Parameters<ResetAlarmsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run(params, &ctx).await
    }
}

#[tool_handler]
impl ServerHandler for WinccToolRouter {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}
