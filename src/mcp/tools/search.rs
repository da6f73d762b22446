//! Search tools over the documentation stores.
//!
//! These tools are thin MCP handlers that delegate to SearchService.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::{Deserialize, Serialize};

use crate::mcp::protocol::{OutputFormat, Response};
use crate::mcp::server::McpServer;
use crate::models::GraphNeighbor;
use crate::services::SearchService;

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for search_documentation tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchDocumentationParams {
    /// Natural language search query.
    pub query: String,
    /// Maximum number of results (default: 5).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Optional category filter (e.g., "setup", "api", "usage").
    #[serde(default)]
    pub category: Option<String>,
    /// Output format (default: json).
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for hybrid_search tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HybridSearchParams {
    /// Natural language search query.
    pub query: String,
    /// Maximum number of results (default: 5).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Optional category filter (e.g., "setup", "api", "usage").
    #[serde(default)]
    pub category: Option<String>,
    /// Whether to expand results with graph context (default: true).
    #[serde(default)]
    pub expand_context: Option<bool>,
    /// Output format (default: json).
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for expand_graph tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExpandGraphParams {
    /// Seed node ids to start the traversal from.
    pub seed_ids: Vec<String>,
    /// Maximum number of hops (1-5, default: 2).
    #[serde(default)]
    pub depth: Option<u32>,
    /// Output format (default: json).
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for expand_graph tool.
#[derive(Debug, Serialize)]
pub struct ExpandGraphResult {
    pub seed_ids: Vec<String>,
    pub neighbors: Vec<GraphNeighbor>,
    pub count: usize,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router(router = search_tools, vis = "pub(crate)")]
impl McpServer {
    /// Semantic search over the documentation chunks.
    #[tool(
        description = "Search documentation by semantic similarity. Returns ranked chunks with their parent and related documents."
    )]
    pub async fn search_documentation(
        &self,
        Parameters(params): Parameters<SearchDocumentationParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            query = %params.query,
            limit = ?params.limit,
            category = ?params.category,
            "Running search_documentation tool"
        );

        let service = self.resolve::<SearchService>();
        let response = service
            .search_documentation(
                &params.query,
                params.limit.unwrap_or(5),
                params.category.as_deref(),
            )
            .await?;

        tracing::info!(chunks = response.chunks.len(), "Search completed");

        Response(response, params.format).into()
    }

    /// Hybrid vector + graph search.
    #[tool(
        description = "Hybrid search combining vector similarity with graph context expansion. Results are re-ranked by combined score and deduplicated by document."
    )]
    pub async fn hybrid_search(
        &self,
        Parameters(params): Parameters<HybridSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            query = %params.query,
            limit = ?params.limit,
            category = ?params.category,
            expand_context = ?params.expand_context,
            "Running hybrid_search tool"
        );

        let service = self.resolve::<SearchService>();
        let response = service
            .hybrid_search(
                &params.query,
                params.limit.unwrap_or(5),
                params.category.as_deref(),
                params.expand_context.unwrap_or(true),
            )
            .await?;

        tracing::info!(chunks = response.chunks.len(), "Hybrid search completed");

        Response(response, params.format).into()
    }

    /// Bounded graph traversal from seed nodes.
    #[tool(
        description = "Expand the graph from seed node ids within a bounded depth. Returns connected nodes with relationship labels and hop distances. Unknown seeds yield an empty result."
    )]
    pub async fn expand_graph(
        &self,
        Parameters(params): Parameters<ExpandGraphParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            seeds = params.seed_ids.len(),
            depth = ?params.depth,
            "Running expand_graph tool"
        );

        let service = self.resolve::<SearchService>();
        let neighbors = service
            .expand_graph(&params.seed_ids, params.depth.unwrap_or(2))
            .await?;

        let count = neighbors.len();
        let response = ExpandGraphResult {
            seed_ids: params.seed_ids,
            neighbors,
            count,
        };

        tracing::info!(count = count, "Graph expansion completed");

        Response(response, params.format).into()
    }
}
