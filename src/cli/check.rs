//! Connectivity check command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::repositories::{GraphRepository, VectorRepository};

use super::App;

impl App {
    /// Connect to both stores and report what they hold.
    pub async fn run_check(&self) -> Result<()> {
        let config = Config::load()?;
        let ctx = Context::from(config).await?;

        let graph_repo = GraphRepository::from_ref(&ctx);
        let documents = graph_repo.document_count().await?;
        println!("Neo4j: {} ({} documents)", ctx.config.neo4j.uri, documents);

        let vector_repo = VectorRepository::from_ref(&ctx);
        let overview = vector_repo.collection_overview().await?;
        println!(
            "Qdrant: {} (collection '{}', {} points)",
            ctx.config.qdrant.url(),
            overview.collection,
            overview.points
        );
        if let Some(size) = overview.vector_size {
            println!(
                "  vector size: {}, distance: {}",
                size,
                overview.distance.as_deref().unwrap_or("unknown")
            );
            if size as usize != ctx.config.embedding.dimensions {
                tracing::warn!(
                    collection = size,
                    configured = ctx.config.embedding.dimensions,
                    "Collection vector size does not match configured embedding dimensions"
                );
            }
        }

        Ok(())
    }
}
