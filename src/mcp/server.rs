//! MCP server implementation for the GraphRAG documentation store.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler},
    model::{
        AnnotateAble, Implementation, ListResourcesResult, PaginatedRequestParam, ProtocolVersion,
        RawResource,
        ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
        ServerInfo,
    },
    service::RequestContext,
    tool_handler, ErrorData as McpError, RoleServer,
};

use crate::context::Context;
use crate::di::FromRef;
use crate::mcp::resources::{self, GRAPH_SCHEMA_URI, VECTOR_COLLECTION_URI};

/// GraphRAG MCP server.
///
/// Forwards natural-language queries to the Neo4j graph store and the Qdrant
/// vector store and merges their results for a language-model client.
#[derive(Clone)]
pub struct McpServer {
    pub(crate) ctx: Arc<Context>,
    tool_router: ToolRouter<McpServer>,
}

impl McpServer {
    /// Create a new GraphRAG MCP server with the given context.
    pub fn new(ctx: Context) -> Self {
        tracing::info!("Initializing GraphRAG MCP server");

        Self {
            ctx: Arc::new(ctx),
            tool_router: Self::search_tools(),
        }
    }

    /// Resolve a dependency from the context.
    pub fn resolve<T: FromRef<Context>>(&self) -> T {
        T::from_ref(&self.ctx)
    }

    /// Get direct access to the context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                r#"GraphRAG Documentation Server

Search a documentation corpus stored in two databases: a Qdrant collection
of embedded document chunks and a Neo4j graph of documents and their
relationships.

## Tools

- **search_documentation** - semantic search over document chunks; returns
  ranked chunks plus the documents they belong to and one-hop related
  documents.
- **hybrid_search** - semantic search followed by graph context expansion;
  results are re-ranked by a combined similarity + graph-proximity score
  and deduplicated by document. Set expand_context=false for plain
  semantic search.
- **expand_graph** - bounded-depth traversal from seed node ids; returns
  connected nodes with relationship labels and hop distances.

## Resources

- graphrag://schema/graph - node labels and relationship types
- graphrag://collection/vector - vector collection configuration
"#
                .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut schema = RawResource::new(GRAPH_SCHEMA_URI, "Graph schema");
        schema.description = Some("Node labels and relationship types of the graph store".into());
        schema.mime_type = Some("text/plain".into());

        let mut collection = RawResource::new(VECTOR_COLLECTION_URI, "Vector collection");
        collection.description = Some("Configuration of the vector store collection".into());
        collection.mime_type = Some("text/plain".into());

        Ok(ListResourcesResult {
            resources: vec![schema.no_annotation(), collection.no_annotation()],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let text = match request.uri.as_str() {
            GRAPH_SCHEMA_URI => resources::graph_schema(),
            VECTOR_COLLECTION_URI => resources::vector_collection(&self.ctx.config),
            _ => {
                return Err(McpError::resource_not_found(
                    format!("Unknown resource: {}", request.uri),
                    None,
                ))
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }
}
