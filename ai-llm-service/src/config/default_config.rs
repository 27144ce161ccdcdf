//! Default LLM configs loaded strictly from environment variables.
//!
//! Two profiles are built from the same provider and credential:
//!
//! - **Chat**      → chat-completion model answering user questions
//! - **Embedding** → embedding model feeding the similarity index
//!
//! # Environment variables
//!
//! - `LLM_PROVIDER`     = `cohere` (default) or `openai`
//! - `COHERE_API_KEY` / `OPENAI_API_KEY` = credential (mandatory for the chosen provider)
//! - `COHERE_URL` / `OPENAI_URL`         = base URL override
//! - `CHAT_MODEL`       = chat model (provider default if unset)
//! - `EMBEDDING_MODEL`  = embedding model (provider default if unset)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = optional temperature (0.0..=2.0)
//! - `LLM_TIMEOUT_SECS` = request timeout, default 60

use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, EnvLookup, env_non_empty, env_opt_f32, env_opt_u32,
        env_opt_u64, must_env, process_env, validate_http_endpoint, validate_range_f32,
    },
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat and embedding profiles resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmProfilesConfig {
    pub chat: LlmModelConfig,
    pub embedding: LlmModelConfig,
}

impl LlmProfilesConfig {
    /// Resolves both profiles from the process environment.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] when the provider credential is absent
    /// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_PROVIDER`
    /// - [`ConfigError::InvalidNumber`] / [`ConfigError::OutOfRange`] for bad knobs
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::from_lookup(&process_env)
    }

    /// Same as [`LlmProfilesConfig::from_env`] but reads through `env`.
    pub fn from_lookup(env: EnvLookup<'_>) -> Result<Self, AiLlmError> {
        let provider = match env_non_empty(env, "LLM_PROVIDER") {
            Some(raw) => raw.parse::<LlmProvider>()?,
            None => LlmProvider::default(),
        };

        let api_key = must_env(env, provider.api_key_var())?;

        let endpoint = env_non_empty(env, provider.endpoint_var())
            .unwrap_or_else(|| provider.default_endpoint().to_string());
        validate_http_endpoint(provider.endpoint_var(), &endpoint)?;

        let max_tokens = env_opt_u32(env, "LLM_MAX_TOKENS")?;
        let temperature = env_opt_f32(env, "LLM_TEMPERATURE")?;
        if let Some(t) = temperature {
            validate_range_f32("LLM_TEMPERATURE", t, 0.0, 2.0)?;
        }
        let timeout_secs = env_opt_u64(env, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let chat_model = env_non_empty(env, "CHAT_MODEL")
            .unwrap_or_else(|| provider.default_chat_model().to_string());
        let embedding_model = env_non_empty(env, "EMBEDDING_MODEL")
            .unwrap_or_else(|| provider.default_embedding_model().to_string());
        if chat_model.is_empty() || embedding_model.is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        debug!(
            %provider,
            %endpoint,
            chat_model = %chat_model,
            embedding_model = %embedding_model,
            "LLM profiles resolved"
        );

        Ok(Self {
            chat: LlmModelConfig {
                provider,
                model: chat_model,
                endpoint: endpoint.clone(),
                api_key: Some(api_key.clone()),
                max_tokens,
                temperature,
                timeout_secs: Some(timeout_secs),
            },
            embedding: LlmModelConfig {
                provider,
                model: embedding_model,
                endpoint,
                api_key: Some(api_key),
                max_tokens: None,
                temperature: None,
                timeout_secs: Some(timeout_secs),
            },
        })
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
    fn missing_credential_is_fatal() {
        let env = lookup(&[]);
        let err = LlmProfilesConfig::from_lookup(&env).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("COHERE_API_KEY"))
        ));
    }

    #[test]
    fn cohere_defaults_apply() {
        let env = lookup(&[("COHERE_API_KEY", "secret")]);
        let cfg = LlmProfilesConfig::from_lookup(&env).unwrap();
        assert_eq!(cfg.chat.provider, LlmProvider::Cohere);
        assert_eq!(cfg.chat.model, "command-r");
        assert_eq!(cfg.embedding.model, "embed-english-v3.0");
        assert_eq!(cfg.embedding.endpoint, "https://api.cohere.com");
        assert_eq!(cfg.chat.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.chat.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn openai_requires_its_own_key() {
        let env = lookup(&[("LLM_PROVIDER", "openai"), ("COHERE_API_KEY", "secret")]);
        let err = LlmProfilesConfig::from_lookup(&env).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn rejects_out_of_range_temperature_and_bad_endpoint() {
        let env = lookup(&[("COHERE_API_KEY", "k"), ("LLM_TEMPERATURE", "3.5")]);
        assert!(LlmProfilesConfig::from_lookup(&env).is_err());

        let env = lookup(&[("COHERE_API_KEY", "k"), ("COHERE_URL", "api.cohere.com")]);
        assert!(LlmProfilesConfig::from_lookup(&env).is_err());
    }

    #[test]
    fn overrides_are_honoured() {
        let env = lookup(&[
            ("COHERE_API_KEY", "k"),
            ("CHAT_MODEL", "command-r-plus"),
            ("LLM_MAX_TOKENS", "256"),
            ("LLM_TEMPERATURE", "0.3"),
            ("LLM_TIMEOUT_SECS", "15"),
        ]);
        let cfg = LlmProfilesConfig::from_lookup(&env).unwrap();
        assert_eq!(cfg.chat.model, "command-r-plus");
        assert_eq!(cfg.chat.max_tokens, Some(256));
        assert_eq!(cfg.chat.temperature, Some(0.3));
        assert_eq!(cfg.embedding.max_tokens, None);
        assert_eq!(cfg.embedding.timeout_secs, Some(15));
    }
}
