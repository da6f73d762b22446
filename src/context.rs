//! Application context providing the dependency injection root.

use std::sync::Arc;

use neo4rs::Graph;
use qdrant_client::Qdrant;

use crate::config::Config;
use crate::di::FromRef;
use crate::embedding::AppEmbedder;
use crate::error::AppError;

/// Root application context.
///
/// Holds the process-wide connection handles, constructed once at startup
/// and resolved into repositories and services via `FromRef`. There is no
/// ambient global state; everything flows through this struct.
#[derive(Clone)]
pub struct Context {
    /// Neo4j graph database connection pool.
    pub graph: Arc<Graph>,
    /// Qdrant vector store client.
    pub qdrant: Arc<Qdrant>,
    /// Loaded sentence-embedding model.
    pub embedder: AppEmbedder,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Connect to both stores and load the embedding model.
    pub async fn from(config: Config) -> Result<Self, AppError> {
        tracing::info!(uri = %config.neo4j.uri, "Connecting to Neo4j");
        let graph = Graph::new(&config.neo4j.uri, &config.neo4j.user, &config.neo4j.password)
            .await?;
        tracing::info!("Connected to Neo4j");

        let url = config.qdrant.url();
        tracing::info!(url = %url, collection = %config.qdrant.collection, "Connecting to Qdrant");
        let qdrant = Qdrant::from_url(&url).build()?;

        let embedder = AppEmbedder::new(&config.embedding)?;

        Ok(Self {
            graph: Arc::new(graph),
            qdrant: Arc::new(qdrant),
            embedder,
            config: Arc::new(config),
        })
    }
}

impl FromRef<Context> for Arc<Graph> {
    fn from_ref(ctx: &Context) -> Self {
        ctx.graph.clone()
    }
}

impl FromRef<Context> for Arc<Qdrant> {
    fn from_ref(ctx: &Context) -> Self {
        ctx.qdrant.clone()
    }
}

impl FromRef<Context> for AppEmbedder {
    fn from_ref(ctx: &Context) -> Self {
        ctx.embedder.clone()
    }
}

impl FromRef<Context> for Arc<Config> {
    fn from_ref(ctx: &Context) -> Self {
        ctx.config.clone()
    }
}
