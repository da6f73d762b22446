//! MCP tool implementations.

pub mod search;
