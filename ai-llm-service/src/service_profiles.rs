//! Shared LLM service with two active profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (provider+endpoint+model+key+timeout).
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{EmbedPurpose, LlmProfilesConfig, LlmServiceProfiles};
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let cfg = LlmProfilesConfig::from_env()?;
//! let svc = Arc::new(LlmServiceProfiles::new(cfg.chat, cfg.embedding));
//!
//! let txt = svc.generate("Hello world", None).await?;
//! let emb = svc.embed("Ferris", EmbedPurpose::Query).await?;
//! println!("{txt} / dim = {}", emb.len());
//! # Ok(()) }
//! ```

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{EmbedPurpose, cohere_service::CohereService, open_ai_service::OpenAiService},
};

/// Shared service that manages the **chat** and **embedding** profiles.
///
/// Internally, it caches provider clients keyed by their configuration to
/// avoid recreating HTTP clients on each call.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    chat: LlmModelConfig,
    embedding: LlmModelConfig,

    cohere: RwLock<HashMap<ClientKey, Arc<CohereService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,
}

impl LlmServiceProfiles {
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Self {
        Self {
            chat,
            embedding,
            cohere: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
        }
    }

    /// Generates text using the **chat** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the client cannot be built or the call fails.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let cfg = &self.chat;
        match cfg.provider {
            LlmProvider::Cohere => {
                let cli = self.get_or_init_cohere(cfg).await?;
                cli.generate(prompt, system).await
            }
            LlmProvider::OpenAI => {
                let cli = self.get_or_init_openai(cfg).await?;
                cli.generate(prompt, system).await
            }
        }
    }

    /// Computes an embedding using the **embedding** profile.
    pub async fn embed(&self, input: &str, purpose: EmbedPurpose) -> Result<Vec<f32>, AiLlmError> {
        let cfg = &self.embedding;
        match cfg.provider {
            LlmProvider::Cohere => {
                let cli = self.get_or_init_cohere(cfg).await?;
                cli.embeddings(input, purpose).await
            }
            LlmProvider::OpenAI => {
                let cli = self.get_or_init_openai(cfg).await?;
                cli.embeddings(input).await
            }
        }
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.chat, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_cohere(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<CohereService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.cohere.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.cohere.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(CohereService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.openai.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key to identify unique client configs.
///
/// Sampling knobs are not part of the key: they travel in the request body,
/// while the key covers what the HTTP client itself is built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cohere(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Cohere,
            model: model.into(),
            endpoint: "https://api.cohere.com".into(),
            api_key: Some("k".into()),
            max_tokens: None,
            temperature: None,
            timeout_secs: Some(10),
        }
    }

    #[tokio::test]
    async fn clients_are_cached_per_config() {
        let svc = LlmServiceProfiles::new(cohere("command-r"), cohere("embed-english-v3.0"));
        let a = svc.get_or_init_cohere(&svc.chat).await.unwrap();
        let b = svc.get_or_init_cohere(&svc.chat).await.unwrap();
        let c = svc.get_or_init_cohere(&svc.embedding).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(svc.cohere.read().await.len(), 2);
    }

    #[tokio::test]
    async fn invalid_endpoint_surfaces_as_error() {
        let mut bad = cohere("command-r");
        bad.endpoint = "ftp://example".into();
        let svc = LlmServiceProfiles::new(bad.clone(), bad);
        assert!(svc.generate("hi", None).await.is_err());
    }
}
