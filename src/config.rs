//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/graphrag/config.toml` (XDG) or platform config dir
//! 2. Project config: `.graphrag.toml`
//! 3. Environment variables: `GRAPHRAG_*`
//!
//! Every field has a default matching a local development setup, so the
//! server starts with no config file at all:
//!
//! ```toml
//! [neo4j]
//! uri = "bolt://localhost:7687"
//! user = "neo4j"
//! password = "password"
//!
//! [qdrant]
//! host = "localhost"
//! port = 6334
//! collection = "document_chunks"
//!
//! [embedding]
//! model = "all-MiniLM-L6-v2"
//! dimensions = 384
//! ```

use std::ops::Deref;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub neo4j: Neo4jConfig,
    #[serde(default)]
    pub qdrant: QdrantConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

/// Neo4j graph store connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    /// Bolt URI of the Neo4j instance.
    #[serde(default = "default_neo4j_uri")]
    pub uri: String,
    /// Username for authentication.
    #[serde(default = "default_neo4j_user")]
    pub user: String,
    /// Password for authentication.
    #[serde(default = "default_neo4j_password")]
    pub password: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_neo4j_uri(),
            user: default_neo4j_user(),
            password: default_neo4j_password(),
        }
    }
}

/// Qdrant vector store connection configuration.
///
/// The Rust client speaks gRPC, so the default port is 6334 (Qdrant's REST
/// API lives on 6333).
#[derive(Debug, Clone, Deserialize)]
pub struct QdrantConfig {
    /// Hostname of the Qdrant instance.
    #[serde(default = "default_qdrant_host")]
    pub host: String,
    /// gRPC port of the Qdrant instance.
    #[serde(default = "default_qdrant_port")]
    pub port: u16,
    /// Name of the collection holding document chunk embeddings.
    #[serde(default = "default_qdrant_collection")]
    pub collection: String,
}

impl QdrantConfig {
    /// Connection URL for the gRPC client.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            host: default_qdrant_host(),
            port: default_qdrant_port(),
            collection: default_qdrant_collection(),
        }
    }
}

/// Sentence embedding model configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Model identifier (e.g., "all-MiniLM-L6-v2").
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Embedding vector dimensions. Must match the collection's vector size.
    #[serde(default = "default_embedding_dimensions")]
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            dimensions: default_embedding_dimensions(),
        }
    }
}

fn default_neo4j_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_neo4j_user() -> String {
    "neo4j".to_string()
}

fn default_neo4j_password() -> String {
    "password".to_string()
}

fn default_qdrant_host() -> String {
    "localhost".to_string()
}

fn default_qdrant_port() -> u16 {
    6334
}

fn default_qdrant_collection() -> String {
    "document_chunks".to_string()
}

fn default_embedding_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_embedding_dimensions() -> usize {
    384
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        let user_config = Self::user_config_path();

        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(".graphrag.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("GRAPHRAG_").split("_"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/graphrag/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("graphrag").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("graphrag").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_development() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load().expect("defaults should load");
            assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
            assert_eq!(config.neo4j.user, "neo4j");
            assert_eq!(config.qdrant.url(), "http://localhost:6334");
            assert_eq!(config.qdrant.collection, "document_chunks");
            assert_eq!(config.embedding.model, "all-MiniLM-L6-v2");
            assert_eq!(config.embedding.dimensions, 384);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GRAPHRAG_NEO4J_URI", "bolt://graph:7687");
            jail.set_env("GRAPHRAG_QDRANT_COLLECTION", "docs");
            let config = Config::load().expect("env config should load");
            assert_eq!(config.neo4j.uri, "bolt://graph:7687");
            assert_eq!(config.qdrant.collection, "docs");
            // Untouched fields keep their defaults
            assert_eq!(config.qdrant.port, 6334);
            Ok(())
        });
    }

    #[test]
    fn project_config_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                ".graphrag.toml",
                r#"
                [qdrant]
                host = "vectors.internal"
                port = 7000
                "#,
            )?;
            jail.set_env("GRAPHRAG_QDRANT_PORT", "8000");
            let config = Config::load().expect("layered config should load");
            assert_eq!(config.qdrant.host, "vectors.internal");
            // Env wins over project config
            assert_eq!(config.qdrant.port, 8000);
            Ok(())
        });
    }
}
