use std::{fmt, str::FromStr};

use crate::error_handler::ConfigError;

/// Hosted backend used for chat completions and embeddings.
///
/// Both providers authenticate with a pre-shared bearer key. Selected at
/// startup through `LLM_PROVIDER`.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let p: LlmProvider = "cohere".parse().unwrap();
/// assert_eq!(p, LlmProvider::Cohere);
/// assert_eq!(p.api_key_var(), "COHERE_API_KEY");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LlmProvider {
    /// Cohere REST API (`/v1/chat`, `/v1/embed`).
    #[default]
    Cohere,
    /// OpenAI REST API (`/v1/chat/completions`, `/v1/embeddings`).
    OpenAI,
}

impl LlmProvider {
    /// Environment variable holding this provider's credential.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Cohere => "COHERE_API_KEY",
            LlmProvider::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Environment variable that overrides this provider's base URL.
    pub fn endpoint_var(self) -> &'static str {
        match self {
            LlmProvider::Cohere => "COHERE_URL",
            LlmProvider::OpenAI => "OPENAI_URL",
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            LlmProvider::Cohere => "https://api.cohere.com",
            LlmProvider::OpenAI => "https://api.openai.com",
        }
    }

    pub fn default_chat_model(self) -> &'static str {
        match self {
            LlmProvider::Cohere => "command-r",
            LlmProvider::OpenAI => "gpt-4o-mini",
        }
    }

    pub fn default_embedding_model(self) -> &'static str {
        match self {
            LlmProvider::Cohere => "embed-english-v3.0",
            LlmProvider::OpenAI => "text-embedding-3-small",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cohere" => Ok(LlmProvider::Cohere),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Cohere => f.write_str("cohere"),
            LlmProvider::OpenAI => f.write_str("openai"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers_case_insensitively() {
        assert_eq!("Cohere".parse::<LlmProvider>().unwrap(), LlmProvider::Cohere);
        assert_eq!(" openai ".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "ollama".parse::<LlmProvider>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedProvider(ref p) if p == "ollama"));
    }
}
