mod ngram;
mod text;

pub use ngram::{CharacterNgramEmbedding, DEFAULT_NGRAM_DIMENSION};
pub use text::TextEmbedding;
