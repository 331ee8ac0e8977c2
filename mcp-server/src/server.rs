//! TokenTab MCP Server implementation

use std::sync::Arc;

use crate::dashboard::Dashboard;
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokentab_dashboard::Config;

/// TokenTab MCP Server
///
/// One dashboard per server process, so the updates feed keeps its pages
/// across calls.
#[derive(Clone)]
pub struct TokenTabServer {
    dashboard: Arc<Dashboard>,
    tool_router: ToolRouter<Self>,
}

impl TokenTabServer {
    pub fn from_config(config: Config) -> Result<Self> {
        Ok(Self {
            dashboard: Arc::new(Dashboard::from_config(&config)?),
            tool_router: Self::tool_router(),
        })
    }

    pub async fn session_started(&self) {
        self.dashboard.session_started().await;
    }
}

fn text_result<E: std::fmt::Display>(result: Result<String, E>) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BubblesParams {
    /// Window: "hour", "day", "week", "month" or "year" (default "day")
    #[serde(default)]
    pub window: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PinParams {
    /// Slot index, 0 to 3
    pub slot: usize,
    /// Token id as returned by search_tokens
    pub token_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SlotParams {
    /// Slot index, 0 to 3
    pub slot: usize,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Case-insensitive match on token name or symbol
    pub query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NameParams {
    /// New display name; blank keeps the current one
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WidgetParams {
    /// Widget id: "portfolio", "cowswap", "crypto-bubbles" or "nft"
    pub widget: String,
}

#[tool_router]
impl TokenTabServer {
    // === Feed ===

    #[tool(
        description = "Show the crypto updates feed. The first call loads the first page; each later call scrolls to the end and loads the next page."
    )]
    async fn updates(&self) -> Result<CallToolResult, McpError> {
        let text = self.dashboard.updates().await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    // === Market ===

    #[tool(description = "Show the top movers over a window as a bubbles board.")]
    async fn bubbles(&self, params: Parameters<BubblesParams>) -> Result<CallToolResult, McpError> {
        Ok(text_result(
            self.dashboard.bubbles(params.0.window.as_deref()).await,
        ))
    }

    #[tool(description = "Show prices for the four pinned token slots.")]
    async fn market(&self) -> Result<CallToolResult, McpError> {
        Ok(text_result(self.dashboard.market().await))
    }

    #[tool(description = "Pin a token to a market slot.")]
    async fn pin_token(&self, params: Parameters<PinParams>) -> Result<CallToolResult, McpError> {
        Ok(text_result(
            self.dashboard
                .pin_token(params.0.slot, &params.0.token_id)
                .await,
        ))
    }

    #[tool(description = "Clear a market slot.")]
    async fn unpin_token(&self, params: Parameters<SlotParams>) -> Result<CallToolResult, McpError> {
        Ok(text_result(self.dashboard.unpin_token(params.0.slot).await))
    }

    #[tool(description = "Search tokens that are not already pinned.")]
    async fn search_tokens(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text_result(
            self.dashboard.search_tokens(&params.0.query).await,
        ))
    }

    // === Widgets ===

    #[tool(description = "Show the sidebar widget selection and the cards of the enabled widgets.")]
    async fn widgets(&self) -> Result<CallToolResult, McpError> {
        let text = self.dashboard.widgets().await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Add a sidebar widget, or remove it if it is already shown.")]
    async fn toggle_widget(
        &self,
        params: Parameters<WidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text_result(
            self.dashboard.toggle_widget(&params.0.widget).await,
        ))
    }

    // === Header ===

    #[tool(description = "Show the time-of-day greeting with the user's name.")]
    async fn greeting(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            self.dashboard.greeting(),
        )]))
    }

    #[tool(description = "Change the name shown in the greeting.")]
    async fn set_name(&self, params: Parameters<NameParams>) -> Result<CallToolResult, McpError> {
        Ok(text_result(self.dashboard.set_name(&params.0.name).await))
    }
}

#[tool_handler]
impl ServerHandler for TokenTabServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tokentab".into(),
                title: Some("TokenTab MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: Some("https://tokentab.io".into()),
            },
            instructions: Some(
                r#"TokenTab - crypto dashboard

WIDGETS:
- 'updates' - News feed. Call again to load the next page.
- 'bubbles' - Biggest movers over hour/day/week/month/year
- 'market' - Prices of the four pinned tokens
- 'search_tokens', 'pin_token', 'unpin_token' - Manage pinned tokens
- 'widgets', 'toggle_widget' - Sidebar widgets (portfolio, cowswap, crypto-bubbles, nft)
- 'greeting', 'set_name' - Header greeting"#
                    .into(),
            ),
        }
    }
}
