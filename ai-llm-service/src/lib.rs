//! Shared access to a hosted LLM provider (Cohere or OpenAI).
//!
//! The crate exposes two logical profiles, `chat` and `embedding`, behind
//! [`service_profiles::LlmServiceProfiles`]. Configuration is read strictly
//! from the environment (see [`config::default_config`]) and every failure is
//! reported through the unified [`error_handler::AiLlmError`].

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::{
    default_config::LlmProfilesConfig, llm_model_config::LlmModelConfig,
    llm_provider::LlmProvider,
};
pub use error_handler::{AiLlmError, ConfigError, Provider, ProviderError, ProviderErrorKind};
pub use service_profiles::LlmServiceProfiles;
pub use services::EmbedPurpose;
