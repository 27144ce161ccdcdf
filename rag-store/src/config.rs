//! Runtime configuration for the text store and retrieval.

use std::path::PathBuf;

use ai_llm_service::error_handler::{EnvLookup, env_non_empty, process_env};

use crate::{chunker::ChunkingPolicy, errors::RagError};

/// Text store location used when `BASE_FILE_PATH` is not set.
pub const DEFAULT_BASE_FILE_PATH: &str = "data/base.txt";
/// Number of chunks retrieved per question when `RAG_TOP_K` is not set.
pub const DEFAULT_TOP_K: usize = 2;

/// Configuration for storage, chunking and retrieval.
#[derive(Clone, Debug, PartialEq)]
pub struct RagConfig {
    /// File holding the whole corpus.
    pub base_file_path: PathBuf,
    /// k for top-k retrieval.
    pub top_k: usize,
    pub chunking: ChunkingPolicy,
}

impl RagConfig {
    /// Default config storing the corpus at `path`.
    pub fn new_default(path: impl Into<PathBuf>) -> Self {
        Self {
            base_file_path: path.into(),
            top_k: DEFAULT_TOP_K,
            chunking: ChunkingPolicy::WholeDocument,
        }
    }

    /// Reads `BASE_FILE_PATH`, `RAG_TOP_K`, `CHUNK_CHARS` and `CHUNK_OVERLAP`.
    pub fn from_env() -> Result<Self, RagError> {
        Self::from_lookup(&process_env)
    }

    /// Same as [`RagConfig::from_env`] but reads through `env`.
    pub fn from_lookup(env: EnvLookup<'_>) -> Result<Self, RagError> {
        let base_file_path = env_non_empty(env, "BASE_FILE_PATH")
            .unwrap_or_else(|| DEFAULT_BASE_FILE_PATH.to_string());
        let top_k = parse(env, "RAG_TOP_K", DEFAULT_TOP_K)?;
        let chunk_chars = parse(env, "CHUNK_CHARS", 0usize)?;
        let chunk_overlap = parse(env, "CHUNK_OVERLAP", 0usize)?;

        let chunking = if chunk_chars == 0 {
            ChunkingPolicy::WholeDocument
        } else {
            ChunkingPolicy::FixedSize {
                size: chunk_chars,
                overlap: chunk_overlap,
            }
        };

        let cfg = Self {
            base_file_path: PathBuf::from(base_file_path),
            top_k,
            chunking,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.base_file_path.as_os_str().is_empty() {
            return Err(RagError::Config("base_file_path is empty".into()));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("RAG_TOP_K must be > 0".into()));
        }
        if let ChunkingPolicy::FixedSize { size, overlap } = self.chunking {
            if overlap >= size {
                return Err(RagError::Config(
                    "CHUNK_OVERLAP must be smaller than CHUNK_CHARS".into(),
                ));
            }
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(env: EnvLookup<'_>, k: &str, dflt: T) -> Result<T, RagError> {
    match env_non_empty(env, k) {
        Some(v) => v
            .parse()
            .map_err(|_| RagError::Config(format!("{k} is not a valid number: {v:?}"))),
        None => Ok(dflt),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_single_document_layout() {
        let cfg = RagConfig::from_lookup(&lookup(&[])).unwrap();
        assert_eq!(cfg, RagConfig::new_default(DEFAULT_BASE_FILE_PATH));
        assert_eq!(cfg.top_k, 2);
    }

    #[test]
    fn chunking_enabled_by_chunk_chars() {
        let cfg = RagConfig::from_lookup(&lookup(&[
            ("CHUNK_CHARS", "500"),
            ("CHUNK_OVERLAP", "50"),
            ("RAG_TOP_K", "4"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.chunking,
            ChunkingPolicy::FixedSize {
                size: 500,
                overlap: 50
            }
        );
        assert_eq!(cfg.top_k, 4);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(RagConfig::from_lookup(&lookup(&[("RAG_TOP_K", "two")])).is_err());
        assert!(RagConfig::from_lookup(&lookup(&[("RAG_TOP_K", "0")])).is_err());
        assert!(
            RagConfig::from_lookup(&lookup(&[("CHUNK_CHARS", "10"), ("CHUNK_OVERLAP", "10")]))
                .is_err()
        );
    }
}
