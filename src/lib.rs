//! GraphRAG documentation server.
//!
//! An MCP front end over two external stores: a Neo4j graph of documents and
//! their relationships, and a Qdrant collection of embedded document chunks.

pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod embedding;
pub mod error;
pub mod mcp;
pub mod models;
pub mod repositories;
pub mod services;

pub use di::FromRef;
