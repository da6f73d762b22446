//! Static resource payloads.
//!
//! Both resources describe the shape of the external stores, not their
//! contents, so they are built from constants and configuration alone and
//! never touch the databases.

use crate::config::Config;

/// URI of the graph schema resource.
pub const GRAPH_SCHEMA_URI: &str = "graphrag://schema/graph";

/// URI of the vector collection resource.
pub const VECTOR_COLLECTION_URI: &str = "graphrag://collection/vector";

/// Description of the graph store's node labels and relationship types.
pub fn graph_schema() -> String {
    "Graph Schema
============

Node Labels:
  Document  - a documentation page; properties: id, title
  Chunk     - an embedded fragment of a document; properties: id, text
  Category  - a classification value; properties: name

Relationship Types:
  (Chunk)-[:PART_OF]->(Document)       - chunk membership
  (Document)-[:RELATED_TO]->(Document) - cross-references between documents
  (Document)-[:HAS_CATEGORY]->(Category) - document classification
"
    .to_string()
}

/// Description of the configured vector collection.
pub fn vector_collection(config: &Config) -> String {
    format!(
        "Vector Collection
=================

Collection: {collection}
Vector Size: {dimensions}
Distance Function: Cosine
Embedding Model: {model}

Stored Payload Fields:
  text     - chunk text content
  doc_id   - parent document identifier
  category - source category (optional)
",
        collection = config.qdrant.collection,
        dimensions = config.embedding.dimensions,
        model = config.embedding.model,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_schema_names_all_labels_and_relationships() {
        let schema = graph_schema();
        for label in ["Document", "Chunk", "Category"] {
            assert!(schema.contains(label), "missing label {}", label);
        }
        for rel in ["PART_OF", "RELATED_TO", "HAS_CATEGORY"] {
            assert!(schema.contains(rel), "missing relationship {}", rel);
        }
    }

    #[test]
    fn collection_payload_reflects_configuration() {
        let config = Config::default();
        let payload = vector_collection(&config);
        assert!(payload.contains("document_chunks"));
        assert!(payload.contains("384"));
        assert!(payload.contains("all-MiniLM-L6-v2"));
    }
}
