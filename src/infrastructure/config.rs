use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::RagSettings;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rag: RagSettings,
    pub data: DataConfig,
    pub vector_store: VectorStoreConfig,
    pub embedding: EmbeddingConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub json_path: PathBuf,
    pub txt_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            json_path: PathBuf::from("./data/burkina_tourism_data.json"),
            txt_path: PathBuf::from("./data/burkina_tourism_data.txt"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreBackend {
    #[default]
    Memory,
    Qdrant,
}

impl FromStr for VectorStoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in_memory" => Ok(Self::Memory),
            "qdrant" => Ok(Self::Qdrant),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    pub backend: VectorStoreBackend,
    pub url: String,
    pub collection: String,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            backend: VectorStoreBackend::Memory,
            url: "http://localhost:6334".to_string(),
            collection: "burkina_tourism".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    #[default]
    Local,
    OpenAi,
}

impl FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "ngram" => Ok(Self::Local),
            "openai" => Ok(Self::OpenAi),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    /// Remote model name; ignored by the local provider.
    pub model: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Local,
            model: "text-embedding-3-small".to_string(),
            dimension: 384,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Loads the YAML file named by `APP_CONFIG` (or the default path when it
    /// exists), then applies environment overrides and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("APP_CONFIG") {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_yaml_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup("CHUNK_SIZE") {
            self.rag.chunk_size = parse_var("CHUNK_SIZE", v)?;
        }
        if let Some(v) = lookup("SIMILARITY_THRESHOLD") {
            self.rag.similarity_threshold = parse_var("SIMILARITY_THRESHOLD", v)?;
        }
        if let Some(v) = lookup("TOP_K_RESULTS") {
            self.rag.top_k = parse_var("TOP_K_RESULTS", v)?;
        }
        if let Some(v) = lookup("DEBUG") {
            self.rag.debug = matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes");
        }
        if let Some(v) = lookup("DATA_JSON_PATH") {
            self.data.json_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("DATA_TXT_PATH") {
            self.data.txt_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("VECTOR_STORE") {
            self.vector_store.backend = parse_var("VECTOR_STORE", v)?;
        }
        if let Some(v) = lookup("QDRANT_URL") {
            self.vector_store.url = v;
        }
        if let Some(v) = lookup("COLLECTION_NAME") {
            self.vector_store.collection = v;
        }
        if let Some(v) = lookup("EMBEDDING_PROVIDER") {
            self.embedding.provider = parse_var("EMBEDDING_PROVIDER", v)?;
        }
        if let Some(v) = lookup("EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Some(v) = lookup("EMBEDDING_DIMENSION") {
            self.embedding.dimension = parse_var("EMBEDDING_DIMENSION", v)?;
        }
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("SERVER_PORT") {
            self.server.port = parse_var("SERVER_PORT", v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rag
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.embedding.dimension == 0 {
            return Err(ConfigError::Invalid(
                "embedding dimension must be greater than 0".into(),
            ));
        }
        if self.vector_store.collection.trim().is_empty() {
            return Err(ConfigError::Invalid("collection name is empty".into()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.rag.chunk_size, 600);
        assert!((config.rag.similarity_threshold - 0.30).abs() < f32::EPSILON);
        assert_eq!(config.rag.top_k, 3);
        assert!(config.rag.debug);
        assert_eq!(config.vector_store.collection, "burkina_tourism");
        assert_eq!(config.vector_store.backend, VectorStoreBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "rag:\n  top_k: 5\nvector_store:\n  backend: qdrant\nserver:\n  port: 9000\n",
        )
        .unwrap();

        assert_eq!(config.rag.top_k, 5);
        assert_eq!(config.rag.chunk_size, 600);
        assert_eq!(config.vector_store.backend, VectorStoreBackend::Qdrant);
        assert_eq!(config.vector_store.url, "http://localhost:6334");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("CHUNK_SIZE", "400"),
                ("SIMILARITY_THRESHOLD", "0.5"),
                ("TOP_K_RESULTS", "4"),
                ("DEBUG", "False"),
                ("EMBEDDING_PROVIDER", "openai"),
                ("EMBEDDING_DIMENSION", "1536"),
                ("COLLECTION_NAME", "test_collection"),
            ]))
            .unwrap();

        assert_eq!(config.rag.chunk_size, 400);
        assert!((config.rag.similarity_threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.rag.top_k, 4);
        assert!(!config.rag.debug);
        assert_eq!(config.embedding.provider, EmbeddingProvider::OpenAi);
        assert_eq!(config.embedding.dimension, 1536);
        assert_eq!(config.vector_store.collection, "test_collection");
    }

    #[test]
    fn test_unparsable_env_value_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(env(&[("TOP_K_RESULTS", "three")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "TOP_K_RESULTS"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let mut config = AppConfig::default();
        config.rag.similarity_threshold = 1.2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.yaml");
        std::fs::write(&path, "rag:\n  debug: false\n").unwrap();

        let config = AppConfig::from_yaml_file(&path).unwrap();
        assert!(!config.rag.debug);

        let missing = AppConfig::from_yaml_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
