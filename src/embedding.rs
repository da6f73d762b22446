//! Query embedding via a local sentence-embedding model.

use std::sync::Arc;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::config::EmbeddingConfig;
use crate::error::AppError;

/// Shared handle to the loaded embedding model.
///
/// The model is loaded once at startup and held for the process lifetime;
/// cloning is cheap.
#[derive(Clone)]
pub struct AppEmbedder {
    model: Arc<TextEmbedding>,
    dimensions: usize,
}

impl AppEmbedder {
    /// Load the embedding model named in the config.
    ///
    /// Honors `FASTEMBED_CACHE_DIR` for the model cache location.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, AppError> {
        let model_id = resolve_model(&config.model)?;

        let mut options = InitOptions::new(model_id).with_show_download_progress(false);
        if let Ok(dir) = std::env::var("FASTEMBED_CACHE_DIR") {
            options = options.with_cache_dir(dir.into());
        }

        let model =
            TextEmbedding::try_new(options).map_err(|e| AppError::Embedding(e.to_string()))?;
        tracing::info!(model = %config.model, "Loaded embedding model");

        Ok(Self {
            model: Arc::new(model),
            dimensions: config.dimensions,
        })
    }

    /// Embed a single query string.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let mut vectors = self
            .model
            .embed(vec![text], None)
            .map_err(|e| AppError::Embedding(e.to_string()))?;

        let vector = vectors
            .pop()
            .ok_or_else(|| AppError::Embedding("model returned no vectors".to_string()))?;

        if vector.len() != self.dimensions {
            return Err(AppError::Embedding(format!(
                "vector dimension mismatch: model produced {}, config expects {}",
                vector.len(),
                self.dimensions
            )));
        }

        Ok(vector)
    }

    /// Configured embedding dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Map a configured model name to a fastembed model identifier.
fn resolve_model(name: &str) -> Result<EmbeddingModel, AppError> {
    match name {
        "all-MiniLM-L6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        "BAAI/bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        other => Err(AppError::Embedding(format!(
            "unsupported embedding model '{}' (supported: all-MiniLM-L6-v2, BAAI/bge-small-en-v1.5)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_models_resolve() {
        assert!(resolve_model("all-MiniLM-L6-v2").is_ok());
        assert!(resolve_model("BAAI/bge-small-en-v1.5").is_ok());
    }

    #[test]
    fn unknown_model_is_rejected_with_supported_list() {
        let err = resolve_model("text-embedding-3-small").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("text-embedding-3-small"));
        assert!(message.contains("all-MiniLM-L6-v2"));
    }
}
