use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::{ports::KnowledgeProvider, KnowledgeBase};
use crate::infrastructure::config::DataConfig;

/// The two on-disk inputs of the index: the structured JSON knowledge base
/// and the free-text guide. Either may be absent.
#[derive(Debug, Clone)]
pub struct KnowledgeSource {
    json_path: PathBuf,
    txt_path: PathBuf,
}

impl KnowledgeSource {
    pub fn new(json_path: impl Into<PathBuf>, txt_path: impl Into<PathBuf>) -> Self {
        Self {
            json_path: json_path.into(),
            txt_path: txt_path.into(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(&config.json_path, &config.txt_path)
    }

    /// Missing or unparsable files yield an empty knowledge base.
    pub async fn load_records(&self) -> KnowledgeBase {
        let Some(raw) = read_optional(&self.json_path).await else {
            return KnowledgeBase::default();
        };

        match KnowledgeBase::from_json(&raw) {
            Ok(kb) => {
                info!(path = %self.json_path.display(), records = kb.record_count(), "Loaded knowledge base");
                kb
            }
            Err(e) => {
                error!(path = %self.json_path.display(), error = %e, "Malformed knowledge base, ignoring");
                KnowledgeBase::default()
            }
        }
    }

    pub async fn load_text(&self) -> Option<String> {
        read_optional(&self.txt_path)
            .await
            .filter(|text| !text.trim().is_empty())
    }
}

#[async_trait]
impl KnowledgeProvider for KnowledgeSource {
    async fn records(&self) -> KnowledgeBase {
        self.load_records().await
    }

    async fn corpus_text(&self) -> Option<String> {
        self.load_text().await
    }
}

async fn read_optional(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Some(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Data file not found, skipping");
            None
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read data file");
            None
        }
    }
}
