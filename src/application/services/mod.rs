mod chatbot;
mod composer;
mod indexer;
mod retriever;

pub use chatbot::ChatService;
pub use composer::compose;
pub use indexer::{IndexerService, CORPUS_SOURCE};
pub use retriever::{dedupe, RetrieverService, SearchParams, CATEGORY_BYPASS_SCORE};
