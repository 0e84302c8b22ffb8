use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    Condition, CountPointsBuilder, CreateCollectionBuilder, Distance, Filter, PointStruct,
    SearchPointsBuilder, UpsertPointsBuilder, Value, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use uuid::Uuid;

use crate::domain::{
    ports::VectorStore, Category, DocumentKind, DocumentMetadata, DomainError, Embedding,
    IndexedDocument, StoreMatch,
};

pub struct QdrantVectorStore {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl QdrantVectorStore {
    pub async fn new(url: &str, collection: &str, dimension: usize) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        let store = Self {
            client,
            collection: collection.to_string(),
            dimension,
        };

        store.create_collection().await?;

        Ok(store)
    }

    async fn collection_exists(&self) -> Result<bool, DomainError> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(collections
            .collections
            .iter()
            .any(|c| c.name == self.collection))
    }

    /// Qdrant accepts only integers or UUIDs as point ids, so document ids
    /// are mapped to a stable name-based UUID.
    fn point_id(document_id: &str) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, document_id.as_bytes()).to_string()
    }

    fn payload(document: &IndexedDocument) -> Result<Payload, DomainError> {
        let meta = &document.metadata;
        serde_json::json!({
            "doc_id": document.id,
            "text": document.text,
            "type": meta.kind.as_str(),
            "category": meta.category.as_str(),
            "name": meta.name,
            "city": meta.city,
            "region": meta.region,
            "label": meta.label,
            "cuisine": meta.cuisine,
            "source": meta.source,
            "chunk_id": meta.chunk_id,
        })
        .try_into()
        .map_err(|_| DomainError::internal("Failed to create payload"))
    }

    fn document_from_payload(payload: &HashMap<String, Value>) -> Option<IndexedDocument> {
        let text_field = |key: &str| payload.get(key).and_then(|v| v.as_str()).cloned();

        let kind: DocumentKind =
            serde_json::from_value(serde_json::Value::String(text_field("type")?)).ok()?;
        let category: Category = text_field("category")?.parse().ok()?;

        let mut metadata = DocumentMetadata::new(kind, category)
            .with_name(text_field("name").as_deref())
            .with_city(text_field("city").as_deref())
            .with_region(text_field("region").as_deref())
            .with_label(text_field("label").as_deref())
            .with_cuisine(text_field("cuisine").as_deref());
        metadata.source = text_field("source");
        metadata.chunk_id = payload
            .get("chunk_id")
            .and_then(|v| v.as_integer())
            .map(|i| i as usize);

        Some(IndexedDocument::new(
            text_field("doc_id")?,
            text_field("text")?,
            metadata,
        ))
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
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
        if documents.is_empty() {
            return Ok(());
        }

        let points = documents
            .iter()
            .zip(embeddings)
            .map(|(document, embedding)| {
                Ok(PointStruct::new(
                    Self::point_id(&document.id),
                    embedding.as_slice().to_vec(),
                    Self::payload(document)?,
                ))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(())
    }

    async fn query(
        &self,
        embedding: &Embedding,
        k: usize,
        category: Option<Category>,
    ) -> Result<Vec<StoreMatch>, DomainError> {
        let mut request =
            SearchPointsBuilder::new(&self.collection, embedding.as_slice().to_vec(), k as u64)
                .with_payload(true);
        if let Some(category) = category {
            request = request.filter(Filter::must([Condition::matches(
                "category",
                category.as_str().to_string(),
            )]));
        }

        let results = self
            .client
            .search_points(request)
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(results
            .result
            .into_iter()
            .filter_map(|point| {
                let document = Self::document_from_payload(&point.payload)?;
                Some(StoreMatch {
                    document,
                    distance: 1.0 - point.score,
                })
            })
            .collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let response = self
            .client
            .count(CountPointsBuilder::new(&self.collection).exact(true))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(response.result.map(|r| r.count as usize).unwrap_or(0))
    }

    async fn delete_collection(&self) -> Result<(), DomainError> {
        if self.collection_exists().await? {
            self.client
                .delete_collection(&self.collection)
                .await
                .map_err(|e| DomainError::external(e.to_string()))?;
        }
        Ok(())
    }

    async fn create_collection(&self) -> Result<(), DomainError> {
        if !self.collection_exists().await? {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection).vectors_config(
                        VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine),
                    ),
                )
                .await
                .map_err(|e| DomainError::external(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_id_is_stable() {
        let a = QdrantVectorStore::point_id("site_0");
        assert_eq!(a, QdrantVectorStore::point_id("site_0"));
        assert_ne!(a, QdrantVectorStore::point_id("site_1"));
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_payload_carries_category_for_filtering() {
        let document = IndexedDocument::new(
            "hotel_4",
            "🏨 Hébergement : Hôtel Splendid",
            DocumentMetadata::new(DocumentKind::Hebergement, Category::Hebergement)
                .with_city(Some("Ouagadougou")),
        );
        let payload = QdrantVectorStore::payload(&document).unwrap();
        let map: HashMap<String, Value> = payload.into();

        assert_eq!(
            map.get("category").and_then(|v| v.as_str()).map(String::as_str),
            Some("hebergement")
        );
        let restored = QdrantVectorStore::document_from_payload(&map).unwrap();
        assert_eq!(restored, document);
    }
}
