mod category;
mod conversation;
mod document;
mod embedding;
mod knowledge;

pub use category::Category;
pub use conversation::{Conversation, Message, MessageRole, MAX_MESSAGE_HISTORY};
pub use document::{
    chunk_corpus, DocumentKind, DocumentMetadata, IndexedDocument, SearchResult, StoreMatch,
    TextChunk,
};
pub use embedding::Embedding;
pub use knowledge::{
    EventRecord, KnowledgeBase, LodgingRecord, PracticalInfoRecord, RestaurantRecord, SiteRecord,
    TransportRecord,
};
