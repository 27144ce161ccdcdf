use std::sync::Arc;

use ai_llm_service::{
    AiLlmError, LlmProfilesConfig, LlmServiceProfiles,
    error_handler::{EnvLookup, env_non_empty, process_env},
};
use contextor::CompletionProvider;
use rag_store::{RagConfig, RagStore, ServiceEmbedder};
use thiserror::Error;
use tracing::info;

use crate::error_handler::AppError;

/// Listen port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 10000;

/// Startup configuration failures. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error("invalid PORT {0:?}: expected 1..=65535")]
    InvalidPort(String),

    #[error("invalid FRONTEND_URL {0:?}")]
    InvalidOrigin(String),

    #[error("text store config: {0}")]
    Store(String),
}

/// Listener and CORS settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single allowed origin; `None` allows every origin.
    pub frontend_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(env: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let port = match env_non_empty(env, "PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(p) if p > 0 => p,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: "0.0.0.0".into(),
            port,
            frontend_url: env_non_empty(env, "FRONTEND_URL"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared state for all HTTP handlers, built once at startup.
pub struct AppState {
    /// Text store + similarity index.
    pub store: RagStore,
    /// Chat model answering composed prompts.
    pub llm: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(store: RagStore, llm: Arc<dyn CompletionProvider>) -> Self {
        Self { store, llm }
    }

    /// Builds the state from process environment: resolves the provider
    /// credential (fatal if missing), opens the text store and indexes it.
    pub async fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&process_env).await
    }

    pub async fn from_lookup(env: EnvLookup<'_>) -> Result<Self, AppError> {
        let profiles = LlmProfilesConfig::from_lookup(env).map_err(ConfigError::from)?;
        let rag_cfg =
            RagConfig::from_lookup(env).map_err(|e| ConfigError::Store(e.to_string()))?;

        info!(
            provider = %profiles.chat.provider,
            chat_model = %profiles.chat.model,
            embedding_model = %profiles.embedding.model,
            path = %rag_cfg.base_file_path.display(),
            top_k = rag_cfg.top_k,
            "building application state"
        );

        let svc = Arc::new(LlmServiceProfiles::new(profiles.chat, profiles.embedding));
        let embedder = Arc::new(ServiceEmbedder::new(svc.clone()));
        let store = RagStore::open(rag_cfg, embedder).await?;

        Ok(Self::new(store, svc))
    }
}
