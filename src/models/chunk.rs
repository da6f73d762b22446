//! Document chunk hits returned by the vector store.

use serde::{Deserialize, Serialize};

use super::DocumentNeighbor;

/// A raw similarity hit from the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkHit {
    /// Chunk identifier (Qdrant point id).
    pub chunk_id: String,
    /// Identifier of the document this chunk belongs to, when known.
    ///
    /// Taken from the point payload if present, otherwise resolved through
    /// the graph store's PART_OF relationship.
    pub doc_id: Option<String>,
    /// Chunk text content.
    pub text: String,
    /// Similarity score, higher is better.
    pub score: f32,
    /// Source category from the point payload, if any.
    pub category: Option<String>,
}

/// A ranked chunk in a search response.
///
/// For plain semantic search this is the similarity hit verbatim. For hybrid
/// search with context expansion the combined score and graph neighbors are
/// filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Chunk identifier.
    pub chunk_id: String,
    /// Identifier of the document this chunk belongs to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    /// Chunk text content.
    pub text: String,
    /// Similarity score from the vector store.
    pub score: f32,
    /// Source category from the point payload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Combined similarity + graph-proximity score (hybrid search only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_score: Option<f32>,
    /// Graph neighbors of this chunk's document (hybrid search only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighbors: Vec<DocumentNeighbor>,
}

impl From<ChunkHit> for ScoredChunk {
    fn from(hit: ChunkHit) -> Self {
        Self {
            chunk_id: hit.chunk_id,
            doc_id: hit.doc_id,
            text: hit.text,
            score: hit.score,
            category: hit.category,
            combined_score: None,
            neighbors: Vec::new(),
        }
    }
}
