//! Business logic services.
//!
//! Services orchestrate the repositories and the embedder; they are resolved
//! from the application context via `FromRef`.

mod search;

pub use search::{SearchService, GRAPH_WEIGHT, SIMILARITY_WEIGHT};
