//! MCP tool implementations.

pub mod generate_page;
