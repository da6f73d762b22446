//! Vector store adapter issuing similarity queries against Qdrant.

use std::collections::HashMap;
use std::sync::Arc;

use qdrant_client::qdrant::{
    point_id::PointIdOptions, value::Kind, Condition, Distance, Filter, PointId, Query,
    QueryPointsBuilder, Value,
};
use qdrant_client::Qdrant;

use crate::context::Context;
use crate::di::FromRef;
use crate::error::AppError;
use crate::models::ChunkHit;

/// Summary of the configured collection, for the connectivity check.
#[derive(Debug, Clone)]
pub struct CollectionOverview {
    /// Collection name.
    pub collection: String,
    /// Number of points in the collection.
    pub points: u64,
    /// Configured vector dimensionality, if reported.
    pub vector_size: Option<u64>,
    /// Configured distance metric, if reported.
    pub distance: Option<String>,
}

/// Repository for similarity queries against the Qdrant collection.
#[derive(Clone)]
pub struct VectorRepository {
    client: Arc<Qdrant>,
    collection: String,
}

impl FromRef<Context> for VectorRepository {
    fn from_ref(ctx: &Context) -> Self {
        Self {
            client: ctx.qdrant.clone(),
            collection: ctx.config.qdrant.collection.clone(),
        }
    }
}

impl VectorRepository {
    /// Top-K nearest-neighbor query, optionally scoped to a category.
    ///
    /// Hits come back sorted by descending similarity score.
    pub async fn search_chunks(
        &self,
        vector: Vec<f32>,
        limit: u64,
        category: Option<&str>,
    ) -> Result<Vec<ChunkHit>, AppError> {
        let mut search = QueryPointsBuilder::new(&self.collection)
            .query(Query::new_nearest(vector))
            .limit(limit)
            .with_payload(true);

        if let Some(cat) = category {
            search = search.filter(Filter::must([Condition::matches(
                "category",
                cat.to_string(),
            )]));
        }

        let response = self.client.query(search).await?;

        let hits = response
            .result
            .into_iter()
            .filter_map(|point| {
                let chunk_id = point.id.as_ref().and_then(point_id_to_string)?;
                Some(ChunkHit {
                    chunk_id,
                    doc_id: payload_str(&point.payload, "doc_id"),
                    text: payload_str(&point.payload, "text").unwrap_or_default(),
                    score: point.score,
                    category: payload_str(&point.payload, "category"),
                })
            })
            .collect();

        Ok(hits)
    }

    /// Point count and vector parameters of the collection.
    pub async fn collection_overview(&self) -> Result<CollectionOverview, AppError> {
        let response = self.client.collection_info(&self.collection).await?;
        let info = response.result.unwrap_or_default();

        let params = info
            .config
            .and_then(|c| c.params)
            .and_then(|p| p.vectors_config)
            .and_then(|v| v.config)
            .and_then(|c| match c {
                qdrant_client::qdrant::vectors_config::Config::Params(params) => Some(params),
                qdrant_client::qdrant::vectors_config::Config::ParamsMap(_) => None,
            });

        Ok(CollectionOverview {
            collection: self.collection.clone(),
            points: info.points_count.unwrap_or(0),
            vector_size: params.as_ref().map(|p| p.size),
            distance: params
                .as_ref()
                .and_then(|p| Distance::try_from(p.distance).ok())
                .map(|d| format!("{:?}", d)),
        })
    }
}

/// Render a Qdrant point id as a string chunk id.
fn point_id_to_string(id: &PointId) -> Option<String> {
    match id.point_id_options.as_ref()? {
        PointIdOptions::Num(n) => Some(n.to_string()),
        PointIdOptions::Uuid(u) => Some(u.clone()),
    }
}

/// Extract a string field from a point payload.
fn payload_str(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    match payload.get(key)?.kind.as_ref()? {
        Kind::StringValue(s) => Some(s.clone()),
        _ => None,
    }
}
