//! Cohere service for chat and embeddings.
//!
//! Endpoints are derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat  — single-turn chat, reply in `text`
//! - POST {endpoint}/v1/embed — embeddings, vectors in `embeddings`
//!
//! Cohere v3 embedding models need an `input_type`; it is derived from the
//! caller's [`EmbedPurpose`].

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, Provider, ProviderError, ProviderErrorKind},
    services::{EmbedPurpose, build_client, post_json},
};

/// Thin client for the Cohere API.
#[derive(Debug)]
pub struct CohereService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
    url_embed: String,
}

impl CohereService {
    /// Creates a new [`CohereService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not Cohere
    /// - `MissingApiKey` / `InvalidEndpoint` for incomplete configs
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Cohere {
            return Err(
                ProviderError::new(Provider::Cohere, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let (client, base) = build_client(Provider::Cohere, &cfg)?;
        let url_chat = format!("{base}/v1/chat");
        let url_embed = format!("{base}/v1/embed");

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "CohereService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            url_embed,
        })
    }

    /// Sends `prompt` as a single user message and returns the reply text.
    ///
    /// An optional `system` text is sent as Cohere's `preamble`.
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses
    /// - `Decode` if the JSON cannot be parsed or has no `text` field
    ///
    /// An empty `text` is a valid reply and is returned as-is.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = ChatRequest {
            model: &self.cfg.model,
            message: prompt,
            preamble: system,
            temperature: self.cfg.temperature,
            max_tokens: self.cfg.max_tokens,
        };

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_chat
        );

        let out: ChatResponse =
            post_json(&self.client, Provider::Cohere, &self.url_chat, &body, "text").await?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "chat completed"
        );

        Ok(out.text)
    }

    /// Embeds a single text.
    pub async fn embeddings(
        &self,
        input: &str,
        purpose: EmbedPurpose,
    ) -> Result<Vec<f32>, AiLlmError> {
        let started = Instant::now();
        let body = EmbedRequest {
            model: &self.cfg.model,
            texts: [input],
            input_type: input_type(purpose),
        };

        debug!(
            model = %self.cfg.model,
            input_len = input.len(),
            input_type = body.input_type,
            "POST {}", self.url_embed
        );

        let out: EmbedResponse = post_json(
            &self.client,
            Provider::Cohere,
            &self.url_embed,
            &body,
            "embeddings[0]",
        )
        .await?;

        let first = out.embeddings.into_iter().next().ok_or_else(|| {
            ProviderError::new(
                Provider::Cohere,
                ProviderErrorKind::Decode("empty `embeddings` in embed response".into()),
            )
        })?;

        info!(
            model = %self.cfg.model,
            dim = first.len(),
            latency_ms = started.elapsed().as_millis(),
            "embeddings completed"
        );

        Ok(first)
    }
}

fn input_type(purpose: EmbedPurpose) -> &'static str {
    match purpose {
        EmbedPurpose::Document => "search_document",
        EmbedPurpose::Query => "search_query",
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    preamble: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: [&'a str; 1],
    input_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Cohere,
            model: "embed-english-v3.0".into(),
            endpoint: "https://api.cohere.com".into(),
            api_key: Some("co-test".into()),
            max_tokens: None,
            temperature: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn embed_request_shape() {
        let body = EmbedRequest {
            model: "embed-english-v3.0",
            texts: ["Piyush likes chess."],
            input_type: input_type(EmbedPurpose::Document),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["texts"][0], "Piyush likes chess.");
        assert_eq!(json["input_type"], "search_document");
    }

    #[test]
    fn decodes_float_embeddings() {
        let raw = r#"{"id":"x","embeddings":[[0.5,-0.25]],"texts":["a"]}"#;
        let out: EmbedResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(out.embeddings, vec![vec![0.5, -0.25]]);
    }

    #[test]
    fn builds_urls_from_endpoint() {
        let svc = CohereService::new(cfg()).unwrap();
        assert_eq!(svc.url_chat, "https://api.cohere.com/v1/chat");
        assert_eq!(svc.url_embed, "https://api.cohere.com/v1/embed");
    }

    #[test]
    fn missing_key_is_rejected() {
        let mut c = cfg();
        c.api_key = None;
        let err = CohereService::new(c).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::MissingApiKey,
                ..
            })
        ));
    }

    fn cfg_at(endpoint: String) -> LlmModelConfig {
        LlmModelConfig {
            model: "command-r".into(),
            endpoint,
            ..cfg()
        }
    }

    #[tokio::test]
    async fn empty_reply_text_is_passed_through() {
        let base = crate::services::mock_http::serve_once("200 OK", r#"{"text":""}"#).await;
        let svc = CohereService::new(cfg_at(base)).unwrap();

        let reply = svc.generate("hi", None).await.unwrap();

        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn reply_without_text_is_a_decode_error() {
        let base =
            crate::services::mock_http::serve_once("200 OK", r#"{"generation_id":"g1"}"#).await;
        let svc = CohereService::new(cfg_at(base)).unwrap();

        let err = svc.generate("hi", None).await.unwrap_err();

        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::Decode(_),
                ..
            })
        ));
    }
}
