//! LanceDB-backed document store over the knowledge collection.
//!
//! Implements `DocumentStore` from `archaic-core` using LanceDB cosine
//! distance search. The collection is assumed to pre-exist on disk; this
//! service queries it but does not populate it (seeding is exposed for
//! tests and offline ingestion via [`LanceKnowledgeStore::add_documents`]).

use std::sync::Arc;

use arrow_array::{
    Array, FixedSizeListArray, Float32Array, RecordBatch, RecordBatchIterator, StringArray,
};
use arrow_schema::{DataType, Field};
use futures_util::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};

use archaic_core::retrieval::store::DocumentStore;
use archaic_types::document::ScoredDocument;
use archaic_types::error::RetrievalError;

use super::lance::LanceVectorStore;
use super::schema::{knowledge_schema, EMBEDDING_DIMENSION};

/// A document to insert into the knowledge collection.
#[derive(Debug, Clone)]
pub struct KnowledgeDocument {
    pub id: String,
    pub text: String,
    pub source: Option<String>,
}

/// LanceDB-backed knowledge document store.
#[derive(Debug)]
pub struct LanceKnowledgeStore {
    table: lancedb::Table,
    collection: String,
}

impl LanceKnowledgeStore {
    /// Open the pre-existing knowledge collection.
    ///
    /// A missing table is a configuration error, not something this service
    /// can repair, so it surfaces as `CollectionMissing`.
    pub async fn open(
        store: &LanceVectorStore,
        collection: &str,
    ) -> Result<Self, RetrievalError> {
        let table = match store.open_table(collection).await {
            Ok(table) => table,
            Err(lancedb::Error::TableNotFound { .. }) => {
                return Err(RetrievalError::CollectionMissing(collection.to_string()));
            }
            Err(e) => return Err(RetrievalError::Store(e.to_string())),
        };

        Ok(Self {
            table,
            collection: collection.to_string(),
        })
    }

    /// Open the collection, creating an empty table if it does not exist.
    ///
    /// Used by tests and offline ingestion tooling.
    pub async fn create(
        store: &LanceVectorStore,
        collection: &str,
    ) -> Result<Self, RetrievalError> {
        let schema = Arc::new(knowledge_schema());
        let table = store
            .ensure_table(collection, schema)
            .await
            .map_err(|e| RetrievalError::Store(e.to_string()))?;

        Ok(Self {
            table,
            collection: collection.to_string(),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Insert documents with their embedding vectors.
    ///
    /// Each embedding must have exactly `EMBEDDING_DIMENSION` components.
    pub async fn add_documents(
        &self,
        documents: &[KnowledgeDocument],
        embeddings: &[Vec<f32>],
    ) -> Result<(), RetrievalError> {
        if documents.len() != embeddings.len() {
            return Err(RetrievalError::Store(format!(
                "document/embedding count mismatch: {} vs {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let batch = Self::build_record_batch(documents, embeddings)?;
        let schema = batch.schema();
        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);

        self.table
            .add(reader)
            .execute()
            .await
            .map_err(|e| RetrievalError::Store(format!("Failed to add documents: {e}")))?;

        Ok(())
    }

    fn build_record_batch(
        documents: &[KnowledgeDocument],
        embeddings: &[Vec<f32>],
    ) -> Result<RecordBatch, RetrievalError> {
        let schema = Arc::new(knowledge_schema());

        let id_array = StringArray::from(
            documents.iter().map(|d| d.id.clone()).collect::<Vec<_>>(),
        );
        let text_array = StringArray::from(
            documents.iter().map(|d| d.text.clone()).collect::<Vec<_>>(),
        );
        let source_array = StringArray::from(
            documents
                .iter()
                .map(|d| d.source.clone())
                .collect::<Vec<Option<String>>>(),
        );

        let values = Float32Array::from(
            embeddings.iter().flatten().copied().collect::<Vec<f32>>(),
        );
        let field = Arc::new(Field::new("item", DataType::Float32, true));
        let vector_array =
            FixedSizeListArray::new(field, EMBEDDING_DIMENSION, Arc::new(values), None);

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(id_array),
                Arc::new(text_array),
                Arc::new(source_array),
                Arc::new(vector_array),
            ],
        )
        .map_err(|e| RetrievalError::Store(format!("Failed to build record batch: {e}")))
    }
}

impl DocumentStore for LanceKnowledgeStore {
    async fn query(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredDocument>, RetrievalError> {
        let results = self
            .table
            .vector_search(embedding)
            .map_err(|e| RetrievalError::Query(format!("Vector search setup failed: {e}")))?
            .distance_type(lancedb::DistanceType::Cosine)
            .limit(k)
            .execute()
            .await
            .map_err(|e| RetrievalError::Query(format!("Vector search failed: {e}")))?;

        let batches: Vec<RecordBatch> = results
            .try_collect()
            .await
            .map_err(|e| RetrievalError::Query(format!("Failed to collect results: {e}")))?;

        let mut documents = Vec::new();

        for batch in &batches {
            if batch.num_rows() == 0 {
                continue;
            }

            let text_col = batch
                .column_by_name("text")
                .and_then(|c| c.as_any().downcast_ref::<StringArray>())
                .ok_or_else(|| {
                    RetrievalError::Query("text column missing or wrong type".to_string())
                })?;
            let source_col = batch
                .column_by_name("source")
                .and_then(|c| c.as_any().downcast_ref::<StringArray>());
            // The _distance column is added by LanceDB vector search
            let distance_col = batch
                .column_by_name("_distance")
                .and_then(|c| c.as_any().downcast_ref::<Float32Array>());

            for i in 0..batch.num_rows() {
                let source = source_col.and_then(|col| {
                    if col.is_null(i) {
                        None
                    } else {
                        Some(col.value(i).to_string())
                    }
                });

                documents.push(ScoredDocument {
                    text: text_col.value(i).to_string(),
                    source,
                    distance: distance_col.map_or(0.0, |d| d.value(i)),
                });
            }
        }

        // LanceDB returns results ordered, but merging batches can interleave
        documents.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        documents.truncate(k);

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_vec(axis: usize) -> Vec<f32> {
        let mut v = vec![0.0_f32; EMBEDDING_DIMENSION as usize];
        v[axis] = 1.0;
        v
    }

    fn doc(id: &str, text: &str) -> KnowledgeDocument {
        KnowledgeDocument {
            id: id.to_string(),
            text: text.to_string(),
            source: Some(format!("{id}.md")),
        }
    }

    async fn seeded_store(temp_dir: &tempfile::TempDir) -> LanceKnowledgeStore {
        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .expect("Failed to create vector store");
        let knowledge = LanceKnowledgeStore::create(&store, "architect_knowledge")
            .await
            .expect("Failed to create collection");

        knowledge
            .add_documents(
                &[doc("d0", "cantilever basics"), doc("d1", "truss design"), doc("d2", "concrete curing")],
                &[unit_vec(0), unit_vec(1), unit_vec(2)],
            )
            .await
            .expect("Failed to seed documents");

        knowledge
    }

    #[tokio::test]
    async fn test_open_missing_collection_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        let err = LanceKnowledgeStore::open(&store, "architect_knowledge")
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::CollectionMissing(_)));
    }

    #[tokio::test]
    async fn test_query_returns_nearest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let knowledge = seeded_store(&temp_dir).await;

        let results = knowledge.query(&unit_vec(1), 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "truss design");
        assert!(results[0].distance < results[1].distance);
        assert_eq!(results[0].source.as_deref(), Some("d1.md"));
    }

    #[tokio::test]
    async fn test_query_empty_collection_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        let knowledge = LanceKnowledgeStore::create(&store, "architect_knowledge")
            .await
            .unwrap();

        let results = knowledge.query(&unit_vec(0), 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_add_documents_count_mismatch_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        let knowledge = LanceKnowledgeStore::create(&store, "architect_knowledge")
            .await
            .unwrap();

        let err = knowledge
            .add_documents(&[doc("d0", "text")], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Store(_)));
    }

    #[tokio::test]
    async fn test_open_after_create_succeeds() {
        let temp_dir = tempfile::tempdir().unwrap();
        let knowledge = seeded_store(&temp_dir).await;
        drop(knowledge);

        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        let reopened = LanceKnowledgeStore::open(&store, "architect_knowledge")
            .await
            .unwrap();
        assert_eq!(reopened.collection(), "architect_knowledge");

        let results = reopened.query(&unit_vec(0), 1).await.unwrap();
        assert_eq!(results[0].text, "cantilever basics");
    }
}
