use serde::{Deserialize, Serialize};

use crate::domain::classifier::categorize_chunk;
use crate::domain::Category;

/// Origin of an indexed document. Also decides the prefix of its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    SiteTouristique,
    Prix,
    Activites,
    Hebergement,
    Restaurant,
    InfoPratique,
    Transport,
    Evenement,
    TextChunk,
}

impl DocumentKind {
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::SiteTouristique => "site",
            Self::Prix => "prix",
            Self::Activites => "activites",
            Self::Hebergement => "hotel",
            Self::Restaurant => "resto",
            Self::InfoPratique => "info",
            Self::Transport => "transport",
            Self::Evenement => "event",
            Self::TextChunk => "txt_chunk",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SiteTouristique => "site_touristique",
            Self::Prix => "prix",
            Self::Activites => "activites",
            Self::Hebergement => "hebergement",
            Self::Restaurant => "restaurant",
            Self::InfoPratique => "info_pratique",
            Self::Transport => "transport",
            Self::Evenement => "evenement",
            Self::TextChunk => "text_chunk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Free-form label from the source record (lodging class, info heading).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<usize>,
}

impl DocumentMetadata {
    pub fn new(kind: DocumentKind, category: Category) -> Self {
        Self {
            kind,
            category,
            name: None,
            city: None,
            region: None,
            label: None,
            cuisine: None,
            source: None,
            chunk_id: None,
        }
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = non_empty(name);
        self
    }

    pub fn with_city(mut self, city: Option<&str>) -> Self {
        self.city = non_empty(city);
        self
    }

    pub fn with_region(mut self, region: Option<&str>) -> Self {
        self.region = non_empty(region);
        self
    }

    pub fn with_label(mut self, label: Option<&str>) -> Self {
        self.label = non_empty(label);
        self
    }

    pub fn with_cuisine(mut self, cuisine: Option<&str>) -> Self {
        self.cuisine = non_empty(cuisine);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>, chunk_id: usize) -> Self {
        self.source = Some(source.into());
        self.chunk_id = Some(chunk_id);
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl IndexedDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata,
        }
    }
}

/// Raw hit returned by a vector store, ordered by ascending distance.
#[derive(Debug, Clone)]
pub struct StoreMatch {
    pub document: IndexedDocument,
    pub distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub text: String,
    pub score: f32,
    pub metadata: DocumentMetadata,
}

impl From<StoreMatch> for SearchResult {
    fn from(m: StoreMatch) -> Self {
        Self {
            text: m.document.text,
            score: (1.0 - m.distance).clamp(0.0, 1.0),
            metadata: m.document.metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub text: String,
    pub category: Category,
}

/// Splits a free-text guide into sections at headings, then packs sentences
/// into chunks shorter than `chunk_size` characters.
///
/// A heading is a line of capitals directly followed by a line starting with
/// `=`. A sentence longer than `chunk_size` becomes a chunk of its own.
pub fn chunk_corpus(text: &str, chunk_size: usize) -> Vec<TextChunk> {
    split_sections(text)
        .into_iter()
        .flat_map(|section| pack_sentences(&section, chunk_size))
        .map(|text| {
            let category = categorize_chunk(&text);
            TextChunk { text, category }
        })
        .collect()
}

fn split_sections(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let next = lines.get(i + 1).copied().unwrap_or_default();
        if is_heading(line) && next.trim_start().starts_with('=') && !current.is_empty() {
            sections.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }

    if !current.is_empty() {
        sections.push(current.join("\n"));
    }

    sections
        .into_iter()
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

fn is_heading(line: &str) -> bool {
    let line = line.trim();
    let mut chars = line.chars();
    matches!(chars.next(), Some(c) if c.is_uppercase())
        && line.chars().count() > 1
        && chars.all(|c| c.is_uppercase() || c.is_whitespace())
}

fn pack_sentences(section: &str, chunk_size: usize) -> Vec<String> {
    let pieces: Vec<&str> = section.split(". ").collect();
    let last = pieces.len().saturating_sub(1);

    let mut chunks = Vec::new();
    let mut current = String::new();

    for (i, piece) in pieces.iter().enumerate() {
        let sentence = if i < last {
            format!("{piece}. ")
        } else {
            (*piece).to_string()
        };

        if current.chars().count() + piece.chars().count() < chunk_size {
            current.push_str(&sentence);
        } else {
            if !current.trim().is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = sentence;
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_corpus_single_chunk() {
        let chunks = chunk_corpus("Le pays est accueillant. Les gens sont chaleureux.", 600);

        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0].text,
            "Le pays est accueillant. Les gens sont chaleureux."
        );
        assert_eq!(chunks[0].category, Category::General);
    }

    #[test]
    fn test_chunk_corpus_respects_chunk_size() {
        let text = (0..100)
            .map(|i| format!("Phrase numéro {i}"))
            .collect::<Vec<_>>()
            .join(". ");
        let chunks = chunk_corpus(&text, 120);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 120 + 20, "{}", chunk.text);
        }
    }

    #[test]
    fn test_chunk_corpus_splits_at_headings() {
        let text = "INTRODUCTION\n============\nBienvenue au pays.\n\
                    TRANSPORT\n=========\nLe bus relie les villes.";
        let chunks = chunk_corpus(text, 600);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].text.starts_with("INTRODUCTION"));
        assert!(chunks[1].text.starts_with("TRANSPORT"));
        assert_eq!(chunks[1].category, Category::Transport);
    }

    #[test]
    fn test_chunk_corpus_accented_heading() {
        let text = "Avant.\nÉVÉNEMENTS CULTURELS\n====\nLe FESPACO.";
        let chunks = chunk_corpus(text, 600);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].text.starts_with("ÉVÉNEMENTS"));
    }

    #[test]
    fn test_chunk_corpus_empty() {
        assert!(chunk_corpus("", 600).is_empty());
        assert!(chunk_corpus("\n\n====\n", 600).is_empty());
    }

    #[test]
    fn test_metadata_drops_blank_fields() {
        let meta = DocumentMetadata::new(DocumentKind::Hebergement, Category::Hebergement)
            .with_name(Some("  "))
            .with_city(Some("Banfora"));

        assert_eq!(meta.name, None);
        assert_eq!(meta.city.as_deref(), Some("Banfora"));
    }

    #[test]
    fn test_search_result_score_is_clamped() {
        let doc = IndexedDocument::new(
            "site_0",
            "text",
            DocumentMetadata::new(DocumentKind::SiteTouristique, Category::SiteTouristique),
        );
        let far = SearchResult::from(StoreMatch {
            document: doc.clone(),
            distance: 1.4,
        });
        let near = SearchResult::from(StoreMatch {
            document: doc,
            distance: 0.25,
        });

        assert_eq!(far.score, 0.0);
        assert!((near.score - 0.75).abs() < 1e-6);
    }
}
