//! Search response payloads.

use serde::{Deserialize, Serialize};

use super::{RelatedDocument, ScoredChunk};

/// Result of a semantic or hybrid search.
///
/// Chunks are ordered by descending score (similarity, or combined score for
/// hybrid search). Related documents list the parent documents of the hits
/// plus any documents discovered through graph expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query that produced these results.
    pub query: String,
    /// Ranked document chunk hits.
    pub chunks: Vec<ScoredChunk>,
    /// Documents connected to the hits through the graph.
    pub related_documents: Vec<RelatedDocument>,
}
