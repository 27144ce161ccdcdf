use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM profile (chat or embedding).
///
/// # Fields
///
/// - `provider`: Which hosted backend to call.
/// - `model`: The model identifier (e.g., `"command-r"`, `"embed-english-v3.0"`).
/// - `endpoint`: Base URL of the provider API (no trailing path).
/// - `api_key`: Pre-shared credential sent as a bearer token.
/// - `max_tokens`: Maximum number of tokens to generate (chat only).
/// - `temperature`: Sampling temperature (chat only).
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Cohere,
///     model: "command-r".to_string(),
///     endpoint: "https://api.cohere.com".to_string(),
///     api_key: Some("co-...".to_string()),
///     max_tokens: Some(512),
///     temperature: Some(0.3),
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.provider, LlmProvider::Cohere);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The hosted provider (Cohere or OpenAI).
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Provider base URL.
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
