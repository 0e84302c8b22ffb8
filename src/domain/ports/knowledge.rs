use async_trait::async_trait;

use crate::domain::KnowledgeBase;

/// Where the records and the free-text guide come from. Implementations
/// swallow their own I/O failures and report them as empty input.
#[async_trait]
pub trait KnowledgeProvider: Send + Sync {
    async fn records(&self) -> KnowledgeBase;
    async fn corpus_text(&self) -> Option<String>;
}
