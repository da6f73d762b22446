//! Application error types with MCP protocol conversion.

use rmcp::model::ErrorCode;
use thiserror::Error;

/// Application-level errors for the GraphRAG server.
///
/// Two kinds matter at the protocol boundary: connectivity failures (one of
/// the external stores is unreachable) and empty results (a query executed
/// but matched nothing). Both surface as failed tool responses; neither is
/// fatal to the server process.
#[derive(Error, Debug)]
pub enum AppError {
    // Graph store errors
    #[error("Neo4j connection error: {0}")]
    GraphConnection(#[from] neo4rs::Error),

    #[error("Neo4j query error: {message}")]
    GraphQuery { message: String, query: String },

    // Vector store errors
    #[error("Qdrant error: {0}")]
    Vector(#[from] qdrant_client::QdrantError),

    // Embedding errors
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    // Empty-result errors
    #[error("No matching documentation for query: {query}")]
    NoResults { query: String },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<AppError> for rmcp::model::ErrorData {
    fn from(err: AppError) -> Self {
        let (code, app_code) = match &err {
            AppError::GraphConnection(_) => (ErrorCode::INTERNAL_ERROR, "GRAPH_CONNECTION_ERROR"),
            AppError::GraphQuery { .. } => (ErrorCode::INTERNAL_ERROR, "GRAPH_QUERY_ERROR"),
            AppError::Vector(_) => (ErrorCode::INTERNAL_ERROR, "VECTOR_STORE_ERROR"),
            AppError::Embedding(_) => (ErrorCode::INTERNAL_ERROR, "EMBEDDING_ERROR"),
            AppError::NoResults { .. } => (ErrorCode::RESOURCE_NOT_FOUND, "NO_RESULTS"),
            AppError::Config(_) => (ErrorCode::INTERNAL_ERROR, "CONFIG_ERROR"),
        };

        rmcp::model::ErrorData::new(code, format!("[{}] {}", app_code, err), None)
    }
}
