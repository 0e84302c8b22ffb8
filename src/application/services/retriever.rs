use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::application::RagSettings;
use crate::domain::{
    classifier::detect_category,
    ports::{EmbeddingService, VectorStore},
    text::clean,
    Category, DocumentMetadata, DomainError, SearchResult, StoreMatch,
};

/// Score above which a hit is kept even when its category differs from the
/// one detected in the query.
pub const CATEGORY_BYPASS_SCORE: f32 = 0.45;

const FILTERED_FETCH_FACTOR: usize = 4;
const UNFILTERED_FETCH_FACTOR: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub top_k: usize,
    pub similarity_threshold: f32,
    pub debug: bool,
}

impl From<&RagSettings> for SearchParams {
    fn from(settings: &RagSettings) -> Self {
        Self {
            top_k: settings.top_k,
            similarity_threshold: settings.similarity_threshold,
            debug: settings.debug,
        }
    }
}

pub struct RetrieverService {
    embedding: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
}

impl RetrieverService {
    pub fn new(embedding: Arc<dyn EmbeddingService>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedding,
            vector_store,
        }
    }

    /// Up to `top_k` cleaned, deduplicated snippets and their similarity
    /// scores, best first. Failures are logged and yield empty results.
    #[instrument(skip(self, params), fields(top_k = params.top_k))]
    pub async fn search(&self, query: &str, params: &SearchParams) -> (Vec<String>, Vec<f32>) {
        match self.try_search(query, params).await {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, "Search failed");
                (Vec::new(), Vec::new())
            }
        }
    }

    async fn try_search(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<(Vec<String>, Vec<f32>), DomainError> {
        let k = params.top_k;
        let category = detect_category(query);
        let embedding = self.embedding.embed(query).await?;

        let matches = match category {
            Some(category) => {
                info!(%category, "Filtering by category");
                let filtered = self
                    .vector_store
                    .query(&embedding, k.saturating_mul(FILTERED_FETCH_FACTOR), Some(category))
                    .await?;
                if filtered.is_empty() {
                    info!("No match in category, searching without filter");
                    self.vector_store
                        .query(&embedding, k.saturating_mul(UNFILTERED_FETCH_FACTOR), None)
                        .await?
                } else {
                    filtered
                }
            }
            None => {
                self.vector_store
                    .query(&embedding, k.saturating_mul(UNFILTERED_FETCH_FACTOR), None)
                    .await?
            }
        };

        if matches.is_empty() {
            warn!("No document found in the collection");
            return Ok((Vec::new(), Vec::new()));
        }

        let candidates = to_candidates(matches);
        let mut kept: Vec<&SearchResult> = candidates
            .iter()
            .filter(|(result, similarity)| {
                is_relevant(
                    *similarity,
                    result.metadata.category,
                    category,
                    params.similarity_threshold,
                )
            })
            .map(|(result, _)| result)
            .collect();

        if kept.is_empty() {
            info!("No document above threshold, using best raw candidates");
            kept = candidates.iter().take(k).map(|(result, _)| result).collect();
        }

        let (mut documents, mut scores): (Vec<String>, Vec<f32>) = dedupe_positions(
            kept.iter().map(|r| (r.text.as_str(), &r.metadata)),
        )
        .into_iter()
        .map(|(i, text)| (text, kept[i].score))
        .unzip();
        documents.truncate(k);
        scores.truncate(k);

        if params.debug {
            info!(query, category = ?category, found = documents.len(), "Retrieval done");
        } else {
            debug!(query, category = ?category, found = documents.len(), "Retrieval done");
        }

        Ok((documents, scores))
    }
}

/// Cleaned results paired with their unclamped similarity `1 - distance`.
fn to_candidates(matches: Vec<StoreMatch>) -> Vec<(SearchResult, f32)> {
    matches
        .into_iter()
        .map(|m| {
            let similarity = 1.0 - m.distance;
            let mut result = SearchResult::from(m);
            result.text = clean(&result.text);
            (result, similarity)
        })
        .collect()
}

fn is_relevant(
    similarity: f32,
    document_category: Category,
    query_category: Option<Category>,
    threshold: f32,
) -> bool {
    if similarity < threshold {
        return false;
    }
    match query_category {
        Some(category) => document_category == category || similarity > CATEGORY_BYPASS_SCORE,
        None => true,
    }
}

/// Drops documents whose `name` was already seen, and repeated lines inside
/// each surviving document. Comparison of lines is trimmed and
/// case-insensitive; blank lines are dropped.
pub fn dedupe(documents: &[String], metadatas: &[DocumentMetadata]) -> Vec<String> {
    dedupe_positions(
        documents
            .iter()
            .map(String::as_str)
            .zip(metadatas.iter()),
    )
    .into_iter()
    .map(|(_, text)| text)
    .collect()
}

/// Like [`dedupe`], also returning the input position of each survivor.
fn dedupe_positions<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a DocumentMetadata)>,
) -> Vec<(usize, String)> {
    let mut seen_names = HashSet::new();
    let mut unique = Vec::new();

    for (i, (text, metadata)) in entries.into_iter().enumerate() {
        if let Some(name) = metadata.name.as_deref() {
            if !seen_names.insert(name.to_string()) {
                continue;
            }
        }

        let mut seen_lines = HashSet::new();
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| {
                let key = line.trim().to_lowercase();
                !key.is_empty() && seen_lines.insert(key)
            })
            .collect();

        unique.push((i, lines.join("\n")));
    }

    unique
}
