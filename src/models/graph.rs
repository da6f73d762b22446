//! Graph store traversal results.

use serde::{Deserialize, Serialize};

/// A document connected to a search result, discovered through the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedDocument {
    /// Document identifier.
    pub doc_id: String,
    /// Document title, if set on the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Hop distance from a search hit, for documents found by expansion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_distance: Option<u32>,
}

/// A neighbor of a specific hit document, used to annotate hybrid results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentNeighbor {
    /// Neighboring document identifier.
    pub doc_id: String,
    /// Document title, if set on the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Hop distance from the hit document.
    pub distance: u32,
}

/// A node reached by bounded traversal from a seed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNeighbor {
    /// Node identifier.
    pub node_id: String,
    /// Node label (e.g., Document, Chunk, Category).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Relationship type of the final edge on the shortest path from a seed.
    pub relationship: String,
    /// Hop distance from the nearest seed node.
    pub distance: u32,
}
