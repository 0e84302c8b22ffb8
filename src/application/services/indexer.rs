use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::{
    chunk_corpus,
    ports::{EmbeddingService, KnowledgeProvider, VectorStore},
    Category, DocumentKind, DocumentMetadata, DomainError, IndexedDocument, KnowledgeBase,
};

pub const CORPUS_SOURCE: &str = "burkina_tourism_data.txt";

/// Turns knowledge records into tagged documents and writes them, embedded,
/// to the vector store.
pub struct IndexerService {
    embedding: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
}

impl IndexerService {
    pub fn new(embedding: Arc<dyn EmbeddingService>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedding,
            vector_store,
        }
    }

    /// Documents in emission order: sites with their price and activity side
    /// documents, lodgings, restaurants, practical info, transport, culture,
    /// events, then corpus chunks. One counter numbers every id.
    pub fn build_documents(
        kb: &KnowledgeBase,
        corpus: Option<&str>,
        chunk_size: usize,
    ) -> Vec<IndexedDocument> {
        let mut docs = DocumentSink::default();

        for site in &kb.sites_touristiques {
            let nom = site.nom.as_deref();
            let ville = site.ville.as_deref();
            docs.push(
                DocumentKind::SiteTouristique,
                site.render(),
                DocumentMetadata::new(DocumentKind::SiteTouristique, Category::SiteTouristique)
                    .with_name(nom)
                    .with_city(ville)
                    .with_region(site.region.as_deref()),
            );
            if let Some(text) = site.render_price() {
                docs.push(
                    DocumentKind::Prix,
                    text,
                    DocumentMetadata::new(DocumentKind::Prix, Category::Prix)
                        .with_name(nom)
                        .with_city(ville),
                );
            }
            if let Some(text) = site.render_activities() {
                docs.push(
                    DocumentKind::Activites,
                    text,
                    DocumentMetadata::new(DocumentKind::Activites, Category::Activites)
                        .with_name(nom)
                        .with_city(ville),
                );
            }
        }

        for hotel in &kb.hebergements {
            docs.push(
                DocumentKind::Hebergement,
                hotel.render(),
                DocumentMetadata::new(DocumentKind::Hebergement, Category::Hebergement)
                    .with_name(hotel.nom.as_deref())
                    .with_city(hotel.ville.as_deref())
                    .with_label(hotel.categorie.as_deref()),
            );
        }

        for resto in &kb.restaurants {
            docs.push(
                DocumentKind::Restaurant,
                resto.render(),
                DocumentMetadata::new(DocumentKind::Restaurant, Category::Restauration)
                    .with_name(resto.nom.as_deref())
                    .with_city(resto.ville.as_deref())
                    .with_cuisine(resto.cuisine.as_deref()),
            );
        }

        for info in &kb.infos_pratiques {
            let label = info.categorie.as_deref();
            docs.push(
                DocumentKind::InfoPratique,
                info.render(),
                DocumentMetadata::new(DocumentKind::InfoPratique, info_category(label))
                    .with_label(label),
            );
        }

        for transport in &kb.transport {
            docs.push(
                DocumentKind::Transport,
                transport.render(),
                DocumentMetadata::new(DocumentKind::Transport, Category::Transport)
                    .with_name(transport.mode.as_deref()),
            );
        }

        for event in kb.culture.iter().chain(&kb.evenements) {
            docs.push(
                DocumentKind::Evenement,
                event.render(),
                DocumentMetadata::new(DocumentKind::Evenement, Category::Activites)
                    .with_name(event.nom.as_deref())
                    .with_city(event.lieu.as_deref())
                    .with_label(event.kind.as_deref()),
            );
        }

        if let Some(text) = corpus {
            for (i, chunk) in chunk_corpus(text, chunk_size).into_iter().enumerate() {
                docs.push(
                    DocumentKind::TextChunk,
                    chunk.text,
                    DocumentMetadata::new(DocumentKind::TextChunk, chunk.category)
                        .with_source(CORPUS_SOURCE, i),
                );
            }
        }

        docs.0
    }

    /// Embeds and stores `documents` in batches of `batch_size`. Returns the
    /// number of documents written.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn ingest(
        &self,
        documents: &[IndexedDocument],
        batch_size: usize,
    ) -> Result<usize, DomainError> {
        if documents.is_empty() {
            warn!("No documents to index");
            return Ok(0);
        }
        if batch_size == 0 {
            return Err(DomainError::validation("batch_size must be greater than 0"));
        }

        for batch in documents.chunks(batch_size) {
            let texts: Vec<&str> = batch.iter().map(|d| d.text.as_str()).collect();
            let embeddings = self.embedding.embed_batch(&texts).await?;
            self.vector_store.add(batch, &embeddings).await?;
        }

        info!(count = documents.len(), "Documents indexed");
        Ok(documents.len())
    }

    /// Indexes the knowledge source unless the collection already holds
    /// documents. Returns the number of documents written.
    #[instrument(skip(self, source))]
    pub async fn load_if_empty(
        &self,
        source: &dyn KnowledgeProvider,
        chunk_size: usize,
        batch_size: usize,
    ) -> Result<usize, DomainError> {
        let existing = self.vector_store.count().await?;
        if existing > 0 {
            info!(existing, "Collection already populated, skipping load");
            return Ok(0);
        }
        self.index_source(source, chunk_size, batch_size).await
    }

    /// Drops the collection, recreates it and indexes the source again.
    #[instrument(skip(self, source))]
    pub async fn rebuild(
        &self,
        source: &dyn KnowledgeProvider,
        chunk_size: usize,
        batch_size: usize,
    ) -> Result<usize, DomainError> {
        self.vector_store.delete_collection().await?;
        self.vector_store.create_collection().await?;
        self.index_source(source, chunk_size, batch_size).await
    }

    async fn index_source(
        &self,
        source: &dyn KnowledgeProvider,
        chunk_size: usize,
        batch_size: usize,
    ) -> Result<usize, DomainError> {
        let records = source.records().await;
        let corpus = source.corpus_text().await;
        let documents = Self::build_documents(&records, corpus.as_deref(), chunk_size);
        self.ingest(&documents, batch_size).await
    }
}

#[derive(Default)]
struct DocumentSink(Vec<IndexedDocument>);

impl DocumentSink {
    fn push(&mut self, kind: DocumentKind, text: String, metadata: DocumentMetadata) {
        let id = format!("{}_{}", kind.id_prefix(), self.0.len());
        self.0.push(IndexedDocument::new(id, text, metadata));
    }
}

fn info_category(label: Option<&str>) -> Category {
    let label = label.unwrap_or_default().to_lowercase();
    if label.contains("transport") {
        Category::Transport
    } else if label.contains("climat") || label.contains("saison") {
        Category::Periode
    } else {
        Category::Pratique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Embedding;
    use crate::infrastructure::{CharacterNgramEmbedding, InMemoryVectorStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SAMPLE: &str = r#"{
        "sites_touristiques": [
            {"nom": "Cascades de Karfiguéla", "ville": "Banfora", "region": "Cascades",
             "prix": "1000 FCFA", "activites": ["Baignade", "Randonnée"]},
            {"nom": "Ruines de Loropéni", "ville": "Loropéni", "prix": ""}
        ],
        "hebergements": [{"nom": "Hôtel Splendid", "ville": "Ouagadougou", "categorie": "4 étoiles"}],
        "restaurants": [{"nom": "Le Verdoyant", "ville": "Ouagadougou", "cuisine": "Italienne"}],
        "infos_pratiques": [
            {"categorie": "Transport", "titre": "Bus", "description": "STMB"},
            {"categorie": "Climat", "titre": "Saisons", "description": "Sec"},
            {"categorie": "Santé", "titre": "Vaccins", "description": "Fièvre jaune"}
        ],
        "evenements": [{"nom": "FESPACO", "type": "Cinéma", "lieu": "Ouagadougou"}]
    }"#;

    struct StaticKnowledge {
        json: &'static str,
        text: Option<&'static str>,
    }

    #[async_trait]
    impl KnowledgeProvider for StaticKnowledge {
        async fn records(&self) -> KnowledgeBase {
            KnowledgeBase::from_json(self.json).unwrap_or_default()
        }

        async fn corpus_text(&self) -> Option<String> {
            self.text.map(str::to_string)
        }
    }

    /// Store that only counts writes.
    #[derive(Default)]
    struct CountingStore {
        batches: AtomicUsize,
        documents: AtomicUsize,
    }

    #[async_trait]
    impl VectorStore for CountingStore {
        async fn add(
            &self,
            documents: &[IndexedDocument],
            _embeddings: &[Embedding],
        ) -> Result<(), DomainError> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            self.documents.fetch_add(documents.len(), Ordering::SeqCst);
            Ok(())
        }

        async fn query(
            &self,
            _embedding: &Embedding,
            _k: usize,
            _category: Option<Category>,
        ) -> Result<Vec<crate::domain::StoreMatch>, DomainError> {
            Ok(Vec::new())
        }

        async fn count(&self) -> Result<usize, DomainError> {
            Ok(self.documents.load(Ordering::SeqCst))
        }

        async fn delete_collection(&self) -> Result<(), DomainError> {
            Ok(())
        }

        async fn create_collection(&self) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn indexer(store: Arc<dyn VectorStore>) -> IndexerService {
        IndexerService::new(Arc::new(CharacterNgramEmbedding::new(64)), store)
    }

    #[test]
    fn test_build_documents_ids_and_categories() {
        let kb = KnowledgeBase::from_json(SAMPLE).unwrap();
        let docs = IndexerService::build_documents(&kb, None, 600);
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(
            ids,
            [
                "site_0",
                "prix_1",
                "activites_2",
                "site_3",
                "hotel_4",
                "resto_5",
                "info_6",
                "info_7",
                "info_8",
                "event_9",
            ]
        );

        let categories: Vec<_> = docs.iter().map(|d| d.metadata.category).collect();
        assert_eq!(
            categories,
            [
                Category::SiteTouristique,
                Category::Prix,
                Category::Activites,
                Category::SiteTouristique,
                Category::Hebergement,
                Category::Restauration,
                Category::Transport,
                Category::Periode,
                Category::Pratique,
                Category::Activites,
            ]
        );
    }

    #[test]
    fn test_side_documents_carry_parent_identity() {
        let kb = KnowledgeBase::from_json(SAMPLE).unwrap();
        let docs = IndexerService::build_documents(&kb, None, 600);

        let price = &docs[1];
        assert_eq!(price.metadata.name.as_deref(), Some("Cascades de Karfiguéla"));
        assert_eq!(price.metadata.city.as_deref(), Some("Banfora"));
        assert!(price.text.starts_with("Prix pour Cascades de Karfiguéla: 1000 FCFA"));
    }

    #[test]
    fn test_corpus_chunks_follow_records() {
        let kb = KnowledgeBase::from_json(SAMPLE).unwrap();
        let corpus = "HÔTELS\n======\nUn hôtel confortable à Banfora. Chambres climatisées.";
        let docs = IndexerService::build_documents(&kb, Some(corpus), 600);
        let chunk = docs.last().unwrap();

        assert_eq!(chunk.id, "txt_chunk_10");
        assert_eq!(chunk.metadata.kind, DocumentKind::TextChunk);
        assert_eq!(chunk.metadata.source.as_deref(), Some(CORPUS_SOURCE));
        assert_eq!(chunk.metadata.chunk_id, Some(0));
        assert_eq!(chunk.metadata.category, Category::Hebergement);
    }

    #[tokio::test]
    async fn test_ingest_writes_fixed_size_batches() {
        let store = Arc::new(CountingStore::default());
        let indexer = indexer(store.clone());
        let docs: Vec<_> = (0..250)
            .map(|i| {
                IndexedDocument::new(
                    format!("txt_chunk_{i}"),
                    format!("chunk {i}"),
                    DocumentMetadata::new(DocumentKind::TextChunk, Category::General),
                )
            })
            .collect();

        let written = indexer.ingest(&docs, 100).await.unwrap();

        assert_eq!(written, 250);
        assert_eq!(store.batches.load(Ordering::SeqCst), 3);
        assert_eq!(store.documents.load(Ordering::SeqCst), 250);
    }

    #[tokio::test]
    async fn test_load_skips_populated_collection() {
        let store = Arc::new(InMemoryVectorStore::new());
        let indexer = indexer(store.clone());
        let source = StaticKnowledge {
            json: SAMPLE,
            text: None,
        };

        assert_eq!(indexer.load_if_empty(&source, 600, 100).await.unwrap(), 10);
        assert_eq!(indexer.load_if_empty(&source, 600, 100).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_rebuild_reindexes_unconditionally() {
        let store = Arc::new(InMemoryVectorStore::new());
        let indexer = indexer(store.clone());
        let source = StaticKnowledge {
            json: SAMPLE,
            text: Some("GUIDE\n=====\nLe climat est chaud."),
        };

        indexer.load_if_empty(&source, 600, 100).await.unwrap();
        let written = indexer.rebuild(&source, 600, 4).await.unwrap();

        assert_eq!(written, 11);
        assert_eq!(store.count().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_empty_source_indexes_nothing() {
        let store = Arc::new(InMemoryVectorStore::new());
        let source = StaticKnowledge {
            json: "{}",
            text: None,
        };

        let written = indexer(store.clone())
            .load_if_empty(&source, 600, 100)
            .await
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
