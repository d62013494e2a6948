//! Streamable HTTP transport for the MCP tool router.

use anyhow::{Context, Result};
use axum::Router;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use winccua_core::Bridge;

use crate::tools::WinccToolRouter;

/// Path the MCP endpoint is mounted at
pub const MCP_PATH: &str = "/mcp";

/// Serve MCP over HTTP until `shutdown` is cancelled.
///
/// Stateless mode: every POST gets a fresh handler over the same shared
/// bridge, so no MCP session is kept between requests.
pub async fn serve(bridge: Bridge, bind_address: &str, shutdown: CancellationToken) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(WinccToolRouter::new(bridge.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            stateful_mode: false,
            ..Default::default()
        },
    );

    let router = Router::new().nest_service(MCP_PATH, service);

    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind MCP server to {}", bind_address))?;

    info!(
        "MCP HTTP server listening at http://{}{}",
        listener.local_addr()?,
        MCP_PATH
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("MCP HTTP server shutting down");
        })
        .await
        .context("MCP HTTP server failed")?;

    Ok(())
}
