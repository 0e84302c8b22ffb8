use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{
    ports::VectorStore, Category, DomainError, Embedding, IndexedDocument, StoreMatch,
};

type Entries = Vec<(IndexedDocument, Embedding)>;

/// Process-local collection. `None` means the collection was dropped and not
/// yet recreated.
pub struct InMemoryVectorStore {
    collection: RwLock<Option<Entries>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(Some(Vec::new())),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_collection() -> DomainError {
    DomainError::not_found("collection does not exist")
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(
        &self,
        documents: &[IndexedDocument],
        embeddings: &[Embedding],
    ) -> Result<(), DomainError> {
        if documents.len() != embeddings.len() {
            return Err(DomainError::validation(format!(
                "{} documents but {} embeddings",
                documents.len(),
                embeddings.len()
            )));
        }

        let mut guard = self
            .collection
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        let store = guard.as_mut().ok_or_else(missing_collection)?;

        for (document, embedding) in documents.iter().zip(embeddings) {
            store.retain(|(d, _)| d.id != document.id);
            store.push((document.clone(), embedding.clone()));
        }
        Ok(())
    }

    async fn query(
        &self,
        embedding: &Embedding,
        k: usize,
        category: Option<Category>,
    ) -> Result<Vec<StoreMatch>, DomainError> {
        let guard = self
            .collection
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        let store = guard.as_ref().ok_or_else(missing_collection)?;

        let mut results: Vec<StoreMatch> = store
            .iter()
            .filter(|(document, _)| category.map_or(true, |c| document.metadata.category == c))
            .map(|(document, stored)| StoreMatch {
                document: document.clone(),
                distance: embedding.cosine_distance(stored),
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);

        Ok(results)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let guard = self
            .collection
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(guard.as_ref().ok_or_else(missing_collection)?.len())
    }

    async fn delete_collection(&self) -> Result<(), DomainError> {
        let mut guard = self
            .collection
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        *guard = None;
        Ok(())
    }

    async fn create_collection(&self) -> Result<(), DomainError> {
        let mut guard = self
            .collection
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        if guard.is_none() {
            *guard = Some(Vec::new());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentKind, DocumentMetadata};

    fn doc(id: &str, category: Category) -> IndexedDocument {
        IndexedDocument::new(
            id,
            format!("text of {id}"),
            DocumentMetadata::new(DocumentKind::TextChunk, category),
        )
    }

    #[tokio::test]
    async fn test_add_and_query() {
        let store = InMemoryVectorStore::new();
        store
            .add(
                &[doc("a", Category::Prix), doc("b", Category::Prix)],
                &[
                    Embedding::new(vec![1.0, 0.0, 0.0]),
                    Embedding::new(vec![0.0, 1.0, 0.0]),
                ],
            )
            .await
            .unwrap();

        let query = Embedding::new(vec![1.0, 0.0, 0.0]);
        let results = store.query(&query, 1, None).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, "a");
        assert!(results[0].distance.abs() < 0.001);
    }

    #[tokio::test]
    async fn test_query_orders_by_distance_and_filters_category() {
        let store = InMemoryVectorStore::new();
        store
            .add(
                &[
                    doc("far", Category::Transport),
                    doc("near", Category::Hebergement),
                    doc("mid", Category::Transport),
                ],
                &[
                    Embedding::new(vec![0.0, 1.0]),
                    Embedding::new(vec![1.0, 0.0]),
                    Embedding::new(vec![1.0, 1.0]),
                ],
            )
            .await
            .unwrap();

        let query = Embedding::new(vec![1.0, 0.0]);
        let all = store.query(&query, 10, None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|m| m.document.id.as_str()).collect();
        assert_eq!(ids, ["near", "mid", "far"]);

        let transport = store
            .query(&query, 10, Some(Category::Transport))
            .await
            .unwrap();
        let ids: Vec<_> = transport.iter().map(|m| m.document.id.as_str()).collect();
        assert_eq!(ids, ["mid", "far"]);
    }

    #[tokio::test]
    async fn test_add_overwrites_existing_id() {
        let store = InMemoryVectorStore::new();
        let embedding = Embedding::new(vec![1.0, 0.0]);
        store
            .add(&[doc("a", Category::Prix)], &[embedding.clone()])
            .await
            .unwrap();
        store
            .add(&[doc("a", Category::Periode)], &[embedding])
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_mismatched_lengths() {
        let store = InMemoryVectorStore::new();
        let result = store.add(&[doc("a", Category::Prix)], &[]).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_collection_lifecycle() {
        let store = InMemoryVectorStore::new();
        store
            .add(&[doc("a", Category::Prix)], &[Embedding::new(vec![1.0])])
            .await
            .unwrap();

        store.delete_collection().await.unwrap();
        assert!(matches!(store.count().await, Err(DomainError::NotFound(_))));

        store.create_collection().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
