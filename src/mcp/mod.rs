//! Model Context Protocol (MCP) front end.
//!
//! Exposes the query composer's three operations as tools and two static
//! resources (graph schema, vector collection) over the MCP stdio transport.
//!
//! ## Modules
//!
//! - `server`: MCP server implementation with tool router and resources
//! - `protocol`: response formatting helpers (JSON / TOON)
//! - `resources`: static resource payloads
//! - `tools`: tool implementations

pub(crate) mod protocol;
pub(crate) mod resources;
pub(crate) mod server;
mod tools;

pub use server::McpServer;
