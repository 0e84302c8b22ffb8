use async_trait::async_trait;

use crate::domain::{errors::DomainError, Category, Embedding, IndexedDocument, StoreMatch};

/// A single cosine-metric collection of indexed documents.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Writes documents and their embeddings in lockstep. Ids already present
    /// are overwritten.
    async fn add(
        &self,
        documents: &[IndexedDocument],
        embeddings: &[Embedding],
    ) -> Result<(), DomainError>;

    /// Nearest documents by ascending cosine distance, optionally restricted
    /// to one category.
    async fn query(
        &self,
        embedding: &Embedding,
        k: usize,
        category: Option<Category>,
    ) -> Result<Vec<StoreMatch>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;

    async fn delete_collection(&self) -> Result<(), DomainError>;

    async fn create_collection(&self) -> Result<(), DomainError>;
}
