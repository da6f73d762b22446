//! CLI module for the GraphRAG server.
//!
//! Subcommands:
//! - `mcp`: Run the MCP server (stdio transport)
//! - `check`: Verify connectivity to both stores

mod check;
mod mcp;

use clap::{Parser, Subcommand};

/// GraphRAG documentation server
#[derive(Parser)]
#[command(name = "graphrag")]
#[command(about = "GraphRAG documentation server - MCP front end over Neo4j and Qdrant")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the MCP server (stdio transport for local use)
    Mcp,

    /// Connect to both stores and report document and vector counts
    Check,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Mcp => self.run_mcp().await,
            Command::Check => self.run_check().await,
        }
    }
}
