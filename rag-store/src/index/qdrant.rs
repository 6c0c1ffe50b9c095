//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! The collection must already exist; this adapter never creates one.

use std::collections::HashMap;

use futures::future::BoxFuture;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{SearchParamsBuilder, SearchPointsBuilder, Value as QValue};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::RagConfig;
use crate::errors::RagError;
use crate::index::VectorIndex;
use crate::record::IndexMatch;

/// A Qdrant collection used as a read-only similarity index.
pub struct QdrantIndex {
    client: Qdrant,
    collection: String,
    exact: bool,
}

impl QdrantIndex {
    /// Builds the client and checks that the collection exists.
    ///
    /// # Errors
    /// - [`RagError::IndexNotFound`] if the collection is missing
    /// - [`RagError::Retrieval`] if the client cannot be built or reached
    pub async fn connect(cfg: &RagConfig) -> Result<Self, RagError> {
        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| RagError::Retrieval(e.to_string()))?;

        let exists = client
            .collection_exists(&cfg.index_name)
            .await
            .map_err(|e| RagError::Retrieval(e.to_string()))?;
        if !exists {
            return Err(RagError::IndexNotFound(cfg.index_name.clone()));
        }

        info!(collection = %cfg.index_name, url = %cfg.qdrant_url, "qdrant index connected");
        Ok(Self {
            client,
            collection: cfg.index_name.clone(),
            exact: cfg.exact_search,
        })
    }
}

impl VectorIndex for QdrantIndex {
    fn query<'a>(
        &'a self,
        vector: Vec<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>> {
        Box::pin(async move {
            debug!(
                collection = %self.collection,
                top_k,
                exact = self.exact,
                "qdrant search"
            );

            let mut builder = SearchPointsBuilder::new(&self.collection, vector, top_k as u64)
                .with_payload(include_metadata);
            if self.exact {
                builder = builder.params(SearchParamsBuilder::default().exact(true));
            }

            let res = self
                .client
                .search_points(builder)
                .await
                .map_err(|e| RagError::Retrieval(e.to_string()))?;

            Ok(res
                .result
                .into_iter()
                .map(|p| IndexMatch {
                    score: p.score,
                    metadata: payload_to_json(p.payload),
                })
                .collect())
        })
    }
}

/// Converts a Qdrant payload into a JSON object, nested values included.
fn payload_to_json(payload: HashMap<String, QValue>) -> Map<String, Value> {
    payload
        .into_iter()
        .map(|(k, v)| (k, value_to_json(v)))
        .collect()
}

fn value_to_json(v: QValue) -> Value {
    use qdrant_client::qdrant::value::Kind as K;
    match v.kind {
        Some(K::StringValue(s)) => Value::String(s),
        Some(K::IntegerValue(i)) => Value::from(i),
        Some(K::DoubleValue(f)) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Some(K::BoolValue(b)) => Value::Bool(b),
        Some(K::StructValue(s)) => Value::Object(payload_to_json(s.fields)),
        Some(K::ListValue(l)) => Value::Array(l.values.into_iter().map(value_to_json).collect()),
        Some(K::NullValue(_)) | None => Value::Null,
    }
}
