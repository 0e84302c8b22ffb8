mod embedding;
mod knowledge;
mod vector_store;

pub use embedding::EmbeddingService;
pub use knowledge::KnowledgeProvider;
pub use vector_store::VectorStore;
