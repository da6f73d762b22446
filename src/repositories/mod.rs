//! Data access layer over the two external stores.
//!
//! Repositories are thin adapters: parameterized queries in, typed records
//! out. They resolve from the application context via `FromRef` and hold no
//! state beyond the shared connection handles.

mod graph;
mod vector;

pub use graph::{ChunkDocument, DocumentEdge, GraphRepository};
pub use vector::{CollectionOverview, VectorRepository};
