pub mod config;
pub mod embedding;
pub mod knowledge_source;
pub mod vector_store;
pub mod wiring;

pub use config::{AppConfig, ConfigError};
pub use embedding::{CharacterNgramEmbedding, TextEmbedding};
pub use knowledge_source::KnowledgeSource;
pub use vector_store::{InMemoryVectorStore, QdrantVectorStore};
pub use wiring::build_chat_service;
