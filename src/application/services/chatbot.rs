use std::sync::{Arc, RwLock};
use tracing::{error, info, instrument};

use crate::application::services::{compose, IndexerService, RetrieverService, SearchParams};
use crate::application::settings::{RagSettings, SettingsPatch, MAX_TOP_K};
use crate::domain::{
    classifier::is_greeting,
    ports::{EmbeddingService, KnowledgeProvider, VectorStore},
    DomainError,
};

/// Entry point of the assistant: answers questions and owns the lifecycle of
/// the indexed collection.
///
/// `reset` rewrites the collection, so callers must not run it concurrently
/// with `chat` or `search`.
pub struct ChatService {
    retriever: RetrieverService,
    indexer: IndexerService,
    vector_store: Arc<dyn VectorStore>,
    source: Arc<dyn KnowledgeProvider>,
    settings: RwLock<RagSettings>,
}

impl ChatService {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        vector_store: Arc<dyn VectorStore>,
        source: Arc<dyn KnowledgeProvider>,
        settings: RagSettings,
    ) -> Self {
        Self {
            retriever: RetrieverService::new(embedding.clone(), vector_store.clone()),
            indexer: IndexerService::new(embedding, vector_store.clone()),
            vector_store,
            source,
            settings: RwLock::new(settings),
        }
    }

    /// Never fails: any internal error becomes an apology message.
    #[instrument(skip(self))]
    pub async fn chat(&self, query: &str) -> String {
        match self.answer(query).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Chat failed");
                format!("Désolé, une erreur s'est produite : {e}")
            }
        }
    }

    async fn answer(&self, query: &str) -> Result<String, DomainError> {
        if is_greeting(query) {
            return Ok(compose(query, &[]));
        }

        let params = SearchParams::from(&self.settings()?);
        let (documents, _scores) = self.retriever.search(query, &params).await;
        Ok(compose(query, &documents))
    }

    /// Raw retrieval, `top_k` defaulting to the current setting.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<(Vec<String>, Vec<f32>), DomainError> {
        let mut params = SearchParams::from(&self.settings()?);
        if let Some(k) = top_k {
            if !(1..=MAX_TOP_K).contains(&k) {
                return Err(DomainError::validation(format!(
                    "top_k must be within [1, {MAX_TOP_K}], got {k}"
                )));
            }
            params.top_k = k;
        }
        Ok(self.retriever.search(query, &params).await)
    }

    /// Indexes the knowledge source if the collection is empty.
    pub async fn load(&self) -> Result<usize, DomainError> {
        let settings = self.settings()?;
        self.indexer
            .load_if_empty(self.source.as_ref(), settings.chunk_size, settings.batch_size)
            .await
    }

    /// Drops and rebuilds the collection from the knowledge source.
    pub async fn reset(&self) -> Result<usize, DomainError> {
        let settings = self.settings()?;
        let written = self
            .indexer
            .rebuild(self.source.as_ref(), settings.chunk_size, settings.batch_size)
            .await?;
        info!(written, "Collection reset");
        Ok(written)
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.vector_store.count().await
    }

    pub fn settings(&self) -> Result<RagSettings, DomainError> {
        self.settings
            .read()
            .map(|s| s.clone())
            .map_err(|e| DomainError::internal(e.to_string()))
    }

    pub fn update_settings(&self, patch: &SettingsPatch) -> Result<RagSettings, DomainError> {
        let mut settings = self
            .settings
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        settings.apply(patch)?;
        info!(settings = ?*settings, "Settings updated");
        Ok(settings.clone())
    }
}
