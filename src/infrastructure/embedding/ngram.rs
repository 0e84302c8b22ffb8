use async_trait::async_trait;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};

pub const DEFAULT_NGRAM_DIMENSION: usize = 384;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Offline embedder: hashed character trigrams plus whole-word features,
/// L2-normalized.
///
/// Deterministic across runs, needs no model download, and works on any
/// Unicode text, which makes it the default for local use and for tests.
/// Vectors are non-negative, so cosine distance stays within `[0, 1]`.
#[derive(Debug, Clone)]
pub struct CharacterNgramEmbedding {
    dimension: usize,
}

impl CharacterNgramEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn bucket(&self, feature: &str) -> usize {
        let hash = feature.bytes().fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        });
        (hash % self.dimension as u64) as usize
    }

    fn encode(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0f32; self.dimension];
        let lower = text.to_lowercase();

        for word in lower.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            vector[self.bucket(word)] += 1.0;

            let padded: Vec<char> = format!(" {word} ").chars().collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                vector[self.bucket(&trigram)] += 0.5;
            }
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        Embedding::new(vector)
    }
}

impl Default for CharacterNgramEmbedding {
    fn default() -> Self {
        Self::new(DEFAULT_NGRAM_DIMENSION)
    }
}

#[async_trait]
impl EmbeddingService for CharacterNgramEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        Ok(self.encode(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        Ok(texts.iter().map(|text| self.encode(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedding_is_deterministic_and_normalized() {
        let embedder = CharacterNgramEmbedding::default();
        let a = embedder.embed("Cascades de Karfiguéla").await.unwrap();
        let b = embedder.embed("Cascades de Karfiguéla").await.unwrap();

        assert_eq!(a, b);
        assert_eq!(a.dimension(), DEFAULT_NGRAM_DIMENSION);
        let norm = a.as_slice().iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_related_texts_are_closer() {
        let embedder = CharacterNgramEmbedding::default();
        let query = embedder.embed("hôtel à Banfora").await.unwrap();
        let hotel = embedder
            .embed("🏨 Hébergement : Hôtel Canne à Sucre\n📍 Ville : Banfora")
            .await
            .unwrap();
        let visa = embedder
            .embed("Visa obligatoire pour la plupart des nationalités")
            .await
            .unwrap();

        assert!(query.cosine_distance(&hotel) < query.cosine_distance(&visa));
    }

    #[tokio::test]
    async fn test_empty_text_yields_zero_vector() {
        let embedder = CharacterNgramEmbedding::new(8);
        let batch = embedder.embed_batch(&["", "!!!"]).await.unwrap();

        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|e| e.as_slice().iter().all(|x| *x == 0.0)));
    }
}
