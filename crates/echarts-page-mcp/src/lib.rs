//! ECharts page MCP server — SSE tool endpoint plus static chart hosting.

pub mod config;
pub mod server;
pub mod tools;

pub use config::Config;
pub use server::{ChartToolServer, ServerError};
