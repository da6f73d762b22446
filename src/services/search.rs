//! Query composer: semantic search, graph expansion, and hybrid search.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::context::Context;
use crate::di::FromRef;
use crate::embedding::AppEmbedder;
use crate::error::AppError;
use crate::models::{
    ChunkHit, DocumentNeighbor, GraphNeighbor, RelatedDocument, ScoredChunk, SearchResponse,
};
use crate::repositories::{ChunkDocument, DocumentEdge, GraphRepository, VectorRepository};

/// Weight of the similarity score in the hybrid combined score.
pub const SIMILARITY_WEIGHT: f32 = 0.7;

/// Weight of the graph-proximity term in the hybrid combined score.
///
/// The proximity term is `GRAPH_WEIGHT / (1 + hop_distance)`: monotonically
/// decreasing in distance, and small enough that graph proximity alone
/// cannot displace a clearly better similarity hit.
pub const GRAPH_WEIGHT: f32 = 0.3;

const DEFAULT_LIMIT: u32 = 5;
const DEFAULT_DEPTH: u32 = 2;

/// Service composing vector similarity queries with graph traversal.
#[derive(Clone)]
pub struct SearchService {
    graph_repo: GraphRepository,
    vector_repo: VectorRepository,
    embedder: AppEmbedder,
}

impl FromRef<Context> for SearchService {
    fn from_ref(ctx: &Context) -> Self {
        Self {
            graph_repo: GraphRepository::from_ref(ctx),
            vector_repo: VectorRepository::from_ref(ctx),
            embedder: AppEmbedder::from_ref(ctx),
        }
    }
}

impl SearchService {
    /// Pure semantic search: embed the query, take the top-K similarity
    /// hits, and resolve their parent and related documents.
    pub async fn search_documentation(
        &self,
        query: &str,
        limit: u32,
        category: Option<&str>,
    ) -> Result<SearchResponse, AppError> {
        let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };

        let embedding = self.embedder.embed(query)?;
        let hits = self
            .vector_repo
            .search_chunks(embedding, limit as u64, category)
            .await?;

        if hits.is_empty() {
            return Err(AppError::NoResults {
                query: query.to_string(),
            });
        }

        let chunk_ids: Vec<String> = hits.iter().map(|h| h.chunk_id.clone()).collect();
        let docs = self
            .graph_repo
            .documents_for_chunks(&chunk_ids, category)
            .await?;

        let hits = assign_documents(hits, &docs);
        let related_documents = collect_related(&docs, limit as usize);

        let mut chunks: Vec<ScoredChunk> = hits.into_iter().map(Into::into).collect();
        chunks.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Ok(SearchResponse {
            query: query.to_string(),
            chunks,
            related_documents,
        })
    }

    /// Bounded-depth traversal from a set of seed node ids.
    ///
    /// Seeds absent from the graph contribute nothing; an entirely unknown
    /// seed set yields an empty result rather than an error.
    pub async fn expand_graph(
        &self,
        seed_ids: &[String],
        depth: u32,
    ) -> Result<Vec<GraphNeighbor>, AppError> {
        let depth = if depth == 0 { DEFAULT_DEPTH } else { depth };
        self.graph_repo.expand_from_seeds(seed_ids, depth).await
    }

    /// Hybrid search: vector similarity seeded graph expansion, merged into
    /// one ranked result set.
    ///
    /// With `expand_context` off this is exactly `search_documentation`.
    pub async fn hybrid_search(
        &self,
        query: &str,
        limit: u32,
        category: Option<&str>,
        expand_context: bool,
    ) -> Result<SearchResponse, AppError> {
        if !expand_context {
            return self.search_documentation(query, limit, category).await;
        }

        let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
        let candidate_k = limit * 2;

        let embedding = self.embedder.embed(query)?;
        let hits = self
            .vector_repo
            .search_chunks(embedding, candidate_k as u64, category)
            .await?;

        if hits.is_empty() {
            return Err(AppError::NoResults {
                query: query.to_string(),
            });
        }

        let chunk_ids: Vec<String> = hits.iter().map(|h| h.chunk_id.clone()).collect();
        let docs = self
            .graph_repo
            .documents_for_chunks(&chunk_ids, category)
            .await?;
        let hits = assign_documents(hits, &docs);

        let seed_ids: Vec<String> = {
            let mut seen = HashSet::new();
            hits.iter()
                .filter_map(|h| h.doc_id.clone())
                .filter(|id| seen.insert(id.clone()))
                .collect()
        };

        let edges = self
            .graph_repo
            .expand_from_documents(&seed_ids, candidate_k as i64)
            .await?;

        let chunks = merge_hybrid(hits, &edges, limit as usize);

        let mut related_documents = collect_related(&docs, limit as usize);
        append_expanded(&mut related_documents, &edges, &seed_ids, limit as usize);

        Ok(SearchResponse {
            query: query.to_string(),
            chunks,
            related_documents,
        })
    }
}

// ============================================================================
// Merge / Rank (pure functions)
// ============================================================================

/// Fill in chunk doc ids from the graph resolution.
///
/// Payload-provided doc ids win; the graph fills the gaps.
fn assign_documents(mut hits: Vec<ChunkHit>, docs: &[ChunkDocument]) -> Vec<ChunkHit> {
    let by_chunk: HashMap<&str, &ChunkDocument> =
        docs.iter().map(|d| (d.chunk_id.as_str(), d)).collect();

    for hit in &mut hits {
        if hit.doc_id.is_none() {
            hit.doc_id = by_chunk
                .get(hit.chunk_id.as_str())
                .map(|d| d.doc_id.clone());
        }
    }

    hits
}

/// Merge similarity hits with graph expansion edges into a ranked,
/// deduplicated result set.
///
/// Combined score: `SIMILARITY_WEIGHT * score + GRAPH_WEIGHT / (1 + d)`
/// where `d` is the hop distance of the hit's document from the nearest
/// other hit document, when such a path exists. One chunk per document id
/// survives (the best-scoring one); the sort is stable on ties.
fn merge_hybrid(hits: Vec<ChunkHit>, edges: &[DocumentEdge], limit: usize) -> Vec<ScoredChunk> {
    // Minimum hop distance at which each document was reached
    let mut min_distance: HashMap<&str, u32> = HashMap::new();
    // Neighbors of each seed document, for result annotation
    let mut neighbors: HashMap<&str, Vec<DocumentNeighbor>> = HashMap::new();

    for edge in edges {
        min_distance
            .entry(edge.doc_id.as_str())
            .and_modify(|d| *d = (*d).min(edge.distance))
            .or_insert(edge.distance);
        neighbors
            .entry(edge.seed_id.as_str())
            .or_default()
            .push(DocumentNeighbor {
                doc_id: edge.doc_id.clone(),
                title: edge.title.clone(),
                distance: edge.distance,
            });
    }

    let mut merged: Vec<ScoredChunk> = Vec::with_capacity(hits.len());
    // Index into `merged` per dedupe key
    let mut best: HashMap<String, usize> = HashMap::new();

    for hit in hits {
        let proximity = hit
            .doc_id
            .as_deref()
            .and_then(|id| min_distance.get(id))
            .map(|d| GRAPH_WEIGHT / (1.0 + *d as f32))
            .unwrap_or(0.0);
        let combined = SIMILARITY_WEIGHT * hit.score + proximity;

        let annotations = hit
            .doc_id
            .as_deref()
            .and_then(|id| neighbors.get(id))
            .cloned()
            .unwrap_or_default();

        // Chunks without a resolved document dedupe by chunk id
        let key = hit
            .doc_id
            .clone()
            .unwrap_or_else(|| format!("chunk:{}", hit.chunk_id));

        let chunk = ScoredChunk {
            chunk_id: hit.chunk_id,
            doc_id: hit.doc_id,
            text: hit.text,
            score: hit.score,
            category: hit.category,
            combined_score: Some(combined),
            neighbors: annotations,
        };

        match best.get(&key) {
            Some(&idx) => {
                if combined > merged[idx].combined_score.unwrap_or(0.0) {
                    merged[idx] = chunk;
                }
            }
            None => {
                best.insert(key, merged.len());
                merged.push(chunk);
            }
        }
    }

    merged.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
    });
    merged.truncate(limit);
    merged
}

/// Collect parent and one-hop related documents, deduplicated in order.
fn collect_related(docs: &[ChunkDocument], limit: usize) -> Vec<RelatedDocument> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for doc in docs {
        if seen.insert(doc.doc_id.clone()) {
            out.push(RelatedDocument {
                doc_id: doc.doc_id.clone(),
                title: doc.title.clone(),
                graph_distance: None,
            });
        }
    }

    let mut related_added = 0;
    for doc in docs {
        for related in &doc.related {
            if related_added >= limit {
                return out;
            }
            if seen.insert(related.doc_id.clone()) {
                out.push(related.clone());
                related_added += 1;
            }
        }
    }

    out
}

/// Append documents discovered by expansion that are not already listed.
fn append_expanded(
    related: &mut Vec<RelatedDocument>,
    edges: &[DocumentEdge],
    seed_ids: &[String],
    limit: usize,
) {
    let seeds: HashSet<&str> = seed_ids.iter().map(|s| s.as_str()).collect();
    let mut listed: HashSet<String> = related.iter().map(|r| r.doc_id.clone()).collect();
    let mut added = 0;

    for edge in edges {
        if added >= limit {
            break;
        }
        if seeds.contains(edge.doc_id.as_str()) || !listed.insert(edge.doc_id.clone()) {
            continue;
        }
        related.push(RelatedDocument {
            doc_id: edge.doc_id.clone(),
            title: edge.title.clone(),
            graph_distance: Some(edge.distance),
        });
        added += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(chunk_id: &str, doc_id: &str, score: f32) -> ChunkHit {
        ChunkHit {
            chunk_id: chunk_id.to_string(),
            doc_id: Some(doc_id.to_string()),
            text: format!("text of {}", chunk_id),
            score,
            category: None,
        }
    }

    fn edge(seed: &str, doc: &str, distance: u32) -> DocumentEdge {
        DocumentEdge {
            seed_id: seed.to_string(),
            doc_id: doc.to_string(),
            title: None,
            distance,
        }
    }

    #[test]
    fn merge_truncates_and_sorts_descending() {
        let hits = vec![
            hit("c1", "d1", 0.4),
            hit("c2", "d2", 0.9),
            hit("c3", "d3", 0.6),
        ];

        let merged = merge_hybrid(hits, &[], 2);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].doc_id.as_deref(), Some("d2"));
        assert_eq!(merged[1].doc_id.as_deref(), Some("d3"));
        let scores: Vec<f32> = merged
            .iter()
            .map(|c| c.combined_score.unwrap())
            .collect();
        assert!(scores[0] >= scores[1]);
    }

    #[test]
    fn merge_without_edges_weights_similarity_only() {
        let merged = merge_hybrid(vec![hit("c1", "d1", 0.8)], &[], 5);

        assert_eq!(merged.len(), 1);
        let combined = merged[0].combined_score.unwrap();
        assert!((combined - SIMILARITY_WEIGHT * 0.8).abs() < 1e-6);
        assert!(merged[0].neighbors.is_empty());
    }

    #[test]
    fn merge_dedupes_document_ids() {
        let hits = vec![
            hit("c1", "d1", 0.9),
            hit("c2", "d1", 0.8),
            hit("c3", "d2", 0.7),
        ];

        let merged = merge_hybrid(hits, &[], 5);

        assert_eq!(merged.len(), 2);
        // The best chunk of d1 survives
        assert_eq!(merged[0].chunk_id, "c1");
        let doc_ids: Vec<_> = merged.iter().filter_map(|c| c.doc_id.clone()).collect();
        let unique: HashSet<_> = doc_ids.iter().collect();
        assert_eq!(doc_ids.len(), unique.len());
    }

    #[test]
    fn linked_hits_rank_ahead_of_isolated_ones() {
        // Vector store returns A:0.9, B:0.7, C:0.5; the graph links A-B.
        let hits = vec![
            hit("a", "A", 0.9),
            hit("b", "B", 0.7),
            hit("c", "C", 0.5),
        ];
        let edges = vec![edge("A", "B", 1), edge("B", "A", 1)];

        let merged = merge_hybrid(hits, &edges, 2);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].doc_id.as_deref(), Some("A"));
        assert_eq!(merged[1].doc_id.as_deref(), Some("B"));
        // A: 0.7*0.9 + 0.3/2 = 0.78, B: 0.7*0.7 + 0.3/2 = 0.64
        assert!((merged[0].combined_score.unwrap() - 0.78).abs() < 1e-6);
        assert!((merged[1].combined_score.unwrap() - 0.64).abs() < 1e-6);
    }

    #[test]
    fn graph_proximity_decreases_with_distance() {
        let hits = vec![hit("b", "B", 0.5), hit("c", "C", 0.5)];
        let edges = vec![edge("A", "B", 1), edge("A", "C", 2)];

        let merged = merge_hybrid(hits, &edges, 5);

        assert_eq!(merged[0].doc_id.as_deref(), Some("B"));
        assert!(merged[0].combined_score.unwrap() > merged[1].combined_score.unwrap());
    }

    #[test]
    fn merge_annotates_hits_with_their_neighbors() {
        let hits = vec![hit("a", "A", 0.9)];
        let edges = vec![edge("A", "X", 1), edge("A", "Y", 2)];

        let merged = merge_hybrid(hits, &edges, 5);

        assert_eq!(merged[0].neighbors.len(), 2);
        assert_eq!(merged[0].neighbors[0].doc_id, "X");
        assert_eq!(merged[0].neighbors[1].distance, 2);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let hits = vec![hit("c1", "d1", 0.5), hit("c2", "d2", 0.5)];

        let merged = merge_hybrid(hits, &[], 5);

        assert_eq!(merged[0].chunk_id, "c1");
        assert_eq!(merged[1].chunk_id, "c2");
    }

    #[test]
    fn expanded_documents_are_appended_without_duplicates() {
        let mut related = vec![RelatedDocument {
            doc_id: "A".to_string(),
            title: None,
            graph_distance: None,
        }];
        let seeds = vec!["A".to_string()];
        let edges = vec![
            edge("A", "X", 1),
            edge("A", "X", 2), // duplicate target
            edge("A", "A", 1), // seed itself
            edge("A", "Y", 2),
        ];

        append_expanded(&mut related, &edges, &seeds, 5);

        let ids: Vec<_> = related.iter().map(|r| r.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "X", "Y"]);
        assert_eq!(related[1].graph_distance, Some(1));
    }

    #[test]
    fn related_documents_dedupe_and_cap() {
        let docs = vec![
            ChunkDocument {
                chunk_id: "c1".to_string(),
                doc_id: "d1".to_string(),
                title: Some("One".to_string()),
                related: vec![RelatedDocument {
                    doc_id: "d2".to_string(),
                    title: None,
                    graph_distance: None,
                }],
            },
            ChunkDocument {
                chunk_id: "c2".to_string(),
                doc_id: "d1".to_string(),
                title: Some("One".to_string()),
                related: Vec::new(),
            },
        ];

        let related = collect_related(&docs, 5);

        let ids: Vec<_> = related.iter().map(|r| r.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2"]);
    }
}
