//! Application layer - Use cases and orchestration.
//!
//! Services here depend on domain ports (traits) rather than concrete
//! adapters: indexing, retrieval, answer composition and the chat entry
//! point that ties them together.

pub mod services;
pub mod settings;
pub mod templates;

pub use services::{
    compose, dedupe, ChatService, IndexerService, RetrieverService, SearchParams,
};
pub use settings::{RagSettings, SettingsPatch, MAX_TOP_K};
