use std::sync::Arc;
use tracing::info;

use crate::application::ChatService;
use crate::domain::{
    ports::{EmbeddingService, VectorStore},
    DomainError,
};
use crate::infrastructure::config::{AppConfig, EmbeddingProvider, VectorStoreBackend};
use crate::infrastructure::{
    CharacterNgramEmbedding, InMemoryVectorStore, KnowledgeSource, QdrantVectorStore,
    TextEmbedding,
};

/// Builds the process-wide embedding and store handles and the chat service
/// on top of them.
pub async fn build_chat_service(config: &AppConfig) -> Result<ChatService, DomainError> {
    let embedding: Arc<dyn EmbeddingService> = match config.embedding.provider {
        EmbeddingProvider::Local => {
            Arc::new(CharacterNgramEmbedding::new(config.embedding.dimension))
        }
        EmbeddingProvider::OpenAi => Arc::new(TextEmbedding::from_config(&config.embedding)),
    };

    let vector_store: Arc<dyn VectorStore> = match config.vector_store.backend {
        VectorStoreBackend::Memory => Arc::new(InMemoryVectorStore::new()),
        VectorStoreBackend::Qdrant => Arc::new(
            QdrantVectorStore::new(
                &config.vector_store.url,
                &config.vector_store.collection,
                embedding.dimension(),
            )
            .await?,
        ),
    };

    info!(
        embedding = ?config.embedding.provider,
        dimension = embedding.dimension(),
        store = ?config.vector_store.backend,
        collection = %config.vector_store.collection,
        "Chat service initialized"
    );

    Ok(ChatService::new(
        embedding,
        vector_store,
        Arc::new(KnowledgeSource::from_config(&config.data)),
        config.rag.clone(),
    ))
}
