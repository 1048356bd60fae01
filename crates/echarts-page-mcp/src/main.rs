//! ECharts page MCP server — entry point.

use std::path::PathBuf;

use clap::Parser;

use echarts_page_mcp::config::Config;
use echarts_page_mcp::server;

#[derive(Parser)]
#[command(
    name = "echarts-page-mcp",
    about = "MCP server that renders ECharts configs into hosted HTML chart pages",
    version
)]
struct Cli {
    /// Content directory for generated pages (env: STATIC_DIR).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Listen port for the SSE endpoint and static file server (env: PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Externally visible base URL for returned chart links (env: PUBLIC_URL).
    #[arg(long)]
    public_url: Option<String>,

    /// Log level (trace, debug, info, warn, error; env: LOG_LEVEL).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.static_dir, cli.port, cli.public_url, cli.log_level);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        static_dir = %config.static_dir.display(),
        port = config.port,
        public_url = %config.public_url,
        "starting echarts-page-mcp"
    );

    if let Err(e) = server::run(config).await {
        tracing::error!(error = %e, "fatal server error");
        std::process::exit(1);
    }

    Ok(())
}
