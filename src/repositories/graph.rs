//! Graph store adapter issuing parameterized traversal queries.

use std::sync::Arc;

use neo4rs::{query, Graph};

use crate::context::Context;
use crate::di::FromRef;
use crate::error::AppError;
use crate::models::{GraphNeighbor, RelatedDocument};

/// Traversal depth cap for graph expansion.
///
/// Cypher cannot bind a variable-length bound as a parameter, so the depth
/// is clamped and inlined into the query string.
pub const MAX_EXPANSION_DEPTH: u32 = 5;

// ============================================================================
// Record Types
// ============================================================================

/// A chunk resolved to its parent document, with related documents collected.
#[derive(Debug, Clone)]
pub struct ChunkDocument {
    /// Chunk identifier.
    pub chunk_id: String,
    /// Parent document identifier (via PART_OF).
    pub doc_id: String,
    /// Parent document title.
    pub title: Option<String>,
    /// Documents related to the parent (one RELATED_TO hop).
    pub related: Vec<RelatedDocument>,
}

/// A graph edge from a seed document to a document within two hops.
#[derive(Debug, Clone)]
pub struct DocumentEdge {
    /// The seed document the traversal started from.
    pub seed_id: String,
    /// The document reached.
    pub doc_id: String,
    /// Title of the reached document.
    pub title: Option<String>,
    /// Minimum hop distance between the two.
    pub distance: u32,
}

// ============================================================================
// Repository
// ============================================================================

/// Repository for traversal queries against the Neo4j graph store.
#[derive(Clone)]
pub struct GraphRepository {
    graph: Arc<Graph>,
}

impl FromRef<Context> for GraphRepository {
    fn from_ref(ctx: &Context) -> Self {
        Self {
            graph: ctx.graph.clone(),
        }
    }
}

impl GraphRepository {
    /// Resolve chunks to their parent documents and collect related documents.
    ///
    /// When a category is given, only documents classified under it (via
    /// HAS_CATEGORY) are returned.
    pub async fn documents_for_chunks(
        &self,
        chunk_ids: &[String],
        category: Option<&str>,
    ) -> Result<Vec<ChunkDocument>, AppError> {
        if chunk_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query_str = if category.is_some() {
            "MATCH (c:Chunk)
             WHERE c.id IN $chunk_ids
             MATCH (c)-[:PART_OF]->(d:Document)-[:HAS_CATEGORY]->(:Category {name: $category})
             OPTIONAL MATCH (d)-[:RELATED_TO]->(related:Document)
             RETURN c.id AS chunk_id, d.id AS doc_id, d.title AS title,
                    collect(DISTINCT {doc_id: related.id, title: related.title}) AS related_docs"
        } else {
            "MATCH (c:Chunk)
             WHERE c.id IN $chunk_ids
             MATCH (c)-[:PART_OF]->(d:Document)
             OPTIONAL MATCH (d)-[:RELATED_TO]->(related:Document)
             RETURN c.id AS chunk_id, d.id AS doc_id, d.title AS title,
                    collect(DISTINCT {doc_id: related.id, title: related.title}) AS related_docs"
        };

        let mut q = query(query_str).param("chunk_ids", chunk_ids.to_vec());
        if let Some(cat) = category {
            q = q.param("category", cat);
        }

        let mut result = self.graph.execute(q).await?;
        let mut out = Vec::new();

        while let Some(row) = result.next().await? {
            let chunk_id: String = row.get("chunk_id").map_err(|e| AppError::GraphQuery {
                message: format!("missing chunk_id: {}", e),
                query: "documents_for_chunks".to_string(),
            })?;
            let doc_id: String = row.get("doc_id").map_err(|e| AppError::GraphQuery {
                message: format!("missing doc_id: {}", e),
                query: "documents_for_chunks".to_string(),
            })?;
            let title: Option<String> = row.get("title").ok();

            let related_raw: Vec<neo4rs::BoltMap> = row.get("related_docs").unwrap_or_default();
            let related: Vec<RelatedDocument> = related_raw
                .into_iter()
                .filter_map(|m| {
                    // Documents without RELATED_TO links collect one all-null map
                    let doc_id: String = m.get("doc_id").ok()?;
                    let title: Option<String> = m.get("title").ok();
                    Some(RelatedDocument {
                        doc_id,
                        title,
                        graph_distance: None,
                    })
                })
                .collect();

            out.push(ChunkDocument {
                chunk_id,
                doc_id,
                title,
                related,
            });
        }

        Ok(out)
    }

    /// Expand RELATED_TO links (up to two hops) from a set of seed documents.
    ///
    /// Returns one edge per (seed, reached) document pair with the minimum
    /// hop distance, nearest first. Reached documents may themselves be
    /// seeds; self-loops are excluded.
    pub async fn expand_from_documents(
        &self,
        doc_ids: &[String],
        limit: i64,
    ) -> Result<Vec<DocumentEdge>, AppError> {
        if doc_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut result = self
            .graph
            .execute(
                query(
                    "MATCH (d:Document)
                     WHERE d.id IN $doc_ids
                     MATCH path = (d)-[:RELATED_TO*1..2]->(related:Document)
                     WHERE related.id <> d.id
                     RETURN d.id AS seed_id, related.id AS doc_id, related.title AS title,
                            min(length(path)) AS distance
                     ORDER BY distance ASC
                     LIMIT $limit",
                )
                .param("doc_ids", doc_ids.to_vec())
                .param("limit", limit),
            )
            .await?;

        let mut out = Vec::new();
        while let Some(row) = result.next().await? {
            let seed_id: Option<String> = row.get("seed_id").ok();
            let doc_id: Option<String> = row.get("doc_id").ok();
            let (Some(seed_id), Some(doc_id)) = (seed_id, doc_id) else {
                continue;
            };
            let title: Option<String> = row.get("title").ok();
            let distance: i64 = row.get("distance").unwrap_or(1);

            out.push(DocumentEdge {
                seed_id,
                doc_id,
                title,
                distance: distance.max(1) as u32,
            });
        }

        Ok(out)
    }

    /// Bounded-depth traversal from arbitrary seed node ids.
    ///
    /// Returns nodes reachable within `depth` hops (in either direction)
    /// with the relationship type of the final edge on the shortest path.
    /// Seeds that do not exist in the graph simply contribute nothing.
    pub async fn expand_from_seeds(
        &self,
        seed_ids: &[String],
        depth: u32,
    ) -> Result<Vec<GraphNeighbor>, AppError> {
        if seed_ids.is_empty() {
            return Ok(Vec::new());
        }

        let depth = depth.clamp(1, MAX_EXPANSION_DEPTH);
        let query_str = format!(
            "MATCH (n)
             WHERE n.id IN $seed_ids
             MATCH path = (n)-[*1..{depth}]-(m)
             WHERE m.id IS NOT NULL AND NOT m.id IN $seed_ids
             WITH m, path
             ORDER BY length(path) ASC
             WITH m, collect(path)[0] AS shortest
             RETURN m.id AS node_id, head(labels(m)) AS label,
                    type(last(relationships(shortest))) AS relationship,
                    length(shortest) AS distance
             ORDER BY distance ASC
             LIMIT 100"
        );

        let mut result = self
            .graph
            .execute(query(&query_str).param("seed_ids", seed_ids.to_vec()))
            .await?;

        let mut out = Vec::new();
        while let Some(row) = result.next().await? {
            let Some(node_id) = row.get::<String>("node_id").ok() else {
                continue;
            };
            let label: Option<String> = row.get("label").ok();
            let relationship: String = row.get("relationship").unwrap_or_default();
            let distance: i64 = row.get("distance").unwrap_or(1);

            out.push(GraphNeighbor {
                node_id,
                label,
                relationship,
                distance: distance.max(1) as u32,
            });
        }

        Ok(out)
    }

    /// Count Document nodes. Used by the connectivity check.
    pub async fn document_count(&self) -> Result<i64, AppError> {
        let mut result = self
            .graph
            .execute(query("MATCH (d:Document) RETURN count(d) AS count"))
            .await?;

        let row = result.next().await?.ok_or_else(|| AppError::GraphQuery {
            message: "count query returned no rows".to_string(),
            query: "document_count".to_string(),
        })?;

        Ok(row.get("count").unwrap_or(0))
    }
}
