//! Request-scoped domain models.
//!
//! Everything here is transient: values live for the span of a single tool
//! invocation. Persistence belongs entirely to the external stores.

mod chunk;
mod graph;
mod search;

pub use chunk::{ChunkHit, ScoredChunk};
pub use graph::{DocumentNeighbor, GraphNeighbor, RelatedDocument};
pub use search::SearchResponse;
