//! Server lifecycle — the MCP SSE endpoint and the static chart file
//! server behind one socket, with signal-driven bounded shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorCode, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use rmcp::{ErrorData, RoleServer, ServerHandler};
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::tools::generate_page;

/// Shared deadline for both listeners' shutdown sequences.
const SHUTDOWN_DEADLINE: Duration = Duration::from_secs(10);

/// SSE keep-alive interval for idle client connections.
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Lifecycle states of the server process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Init,
    Starting,
    Running,
    ShuttingDown,
    Stopped,
    Failed,
}

/// Fatal server errors. Both terminate the process with a non-zero exit;
/// a service that cannot serve has no useful degraded mode.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("startup failed: {0}")]
    Startup(String),

    #[error("shutdown failed: {0}")]
    Shutdown(String),
}

/// The MCP tool service handed to each SSE session.
///
/// Stateless apart from the shared configuration snapshot; invocations are
/// independent and safe to run concurrently.
#[derive(Clone)]
pub struct ChartToolServer {
    config: Arc<Config>,
}

impl ChartToolServer {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl ServerHandler for ChartToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "echarts-page-mcp".to_string(),
                title: Some("ECharts chart page generation service".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Call generate_echarts_page with an ECharts option object to get a URL \
                 to the rendered chart page."
                    .to_string(),
            ),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: vec![generate_page::definition()],
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if request.name.as_ref() != generate_page::NAME {
            return Err(ErrorData::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("unknown tool: {}", request.name),
                None,
            ));
        }

        let args = request.arguments.unwrap_or_default();
        match generate_page::execute(&args, &self.config) {
            Ok(url) => Ok(CallToolResult::success(vec![Content::text(url)])),
            // Recoverable: report in-band so the session stays open.
            Err(e) => {
                tracing::warn!(error = %e, "generate_echarts_page failed");
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}

/// Run the server: bind, serve, block on a termination signal, then drive
/// bounded graceful shutdown. Returns only once both the SSE service and
/// the HTTP server have stopped, or a fatal error occurred.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let mut state = LifecycleState::Init;
    let config = Arc::new(config);

    transition(&mut state, LifecycleState::Starting);

    // The content directory must exist before either listener comes up.
    std::fs::create_dir_all(&config.static_dir).map_err(|e| {
        ServerError::Startup(format!("creating {}: {e}", config.static_dir.display()))
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let ct = CancellationToken::new();

    let (sse_server, sse_router) = SseServer::new(SseServerConfig {
        bind: addr,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: ct.clone(),
        sse_keep_alive: Some(KEEP_ALIVE_INTERVAL),
    });

    // One socket, two independently stopped units: the SSE service
    // (cancelled through `ct`) and the HTTP server (graceful shutdown
    // below). Every path the protocol endpoints don't claim serves the
    // content directory, so artifacts appear at /charts/<file>.
    let app = sse_router.fallback_service(ServeDir::new(&config.static_dir));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Startup(format!("binding {addr}: {e}")))?;

    sse_server.with_service({
        let config = config.clone();
        move || ChartToolServer::new(config.clone())
    });

    let server_ct = ct.child_token();
    let mut serve_task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_ct.cancelled().await })
            .await
    });

    transition(&mut state, LifecycleState::Running);
    tracing::info!(%addr, public_url = %config.public_url, "listening");

    tokio::select! {
        _ = shutdown_signal() => {
            transition(&mut state, LifecycleState::ShuttingDown);
        }
        result = &mut serve_task => {
            transition(&mut state, LifecycleState::Failed);
            return Err(ServerError::Startup(match result {
                Ok(Err(e)) => format!("http server exited: {e}"),
                Ok(Ok(())) => "http server exited unexpectedly".to_string(),
                Err(e) => format!("http server task failed: {e}"),
            }));
        }
    }

    // Stop accepting and drain both units under one deadline.
    ct.cancel();

    match tokio::time::timeout(SHUTDOWN_DEADLINE, &mut serve_task).await {
        Ok(Ok(Ok(()))) => {
            transition(&mut state, LifecycleState::Stopped);
            tracing::info!("shutdown complete");
            Ok(())
        }
        Ok(Ok(Err(e))) => {
            transition(&mut state, LifecycleState::Failed);
            Err(ServerError::Shutdown(format!("http server: {e}")))
        }
        Ok(Err(e)) => {
            transition(&mut state, LifecycleState::Failed);
            Err(ServerError::Shutdown(format!("http server task: {e}")))
        }
        Err(_) => {
            // Deadline elapsed: abort in-flight connections rather than
            // wait on them indefinitely.
            serve_task.abort();
            transition(&mut state, LifecycleState::Failed);
            Err(ServerError::Shutdown(format!(
                "listeners did not stop within {SHUTDOWN_DEADLINE:?}"
            )))
        }
    }
}

fn transition(state: &mut LifecycleState, next: LifecycleState) {
    tracing::debug!(from = ?state, to = ?next, "lifecycle transition");
    *state = next;
}

/// Suspend until SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "failed to install SIGINT handler");
                }
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("SIGINT received, initiating graceful shutdown");
            }
            _ = sigterm.recv() => {
                tracing::info!("SIGTERM received, initiating graceful shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
        }
    }
}
