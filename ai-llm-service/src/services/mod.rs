pub mod cohere_service;
pub mod open_ai_service;

use std::time::Duration;

use reqwest::header;

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, Provider, ProviderError, ProviderErrorKind},
};

/// Role of a text passed to an embedding model.
///
/// Some providers (Cohere v3) embed documents and queries into the same space
/// but require the caller to say which side of the search a text is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedPurpose {
    /// Corpus text stored in the index.
    Document,
    /// User question compared against the corpus.
    Query,
}

/// Validates the shared parts of a provider config and builds an HTTP client
/// with bearer auth, JSON content type and the configured timeout.
///
/// Returns the client and the endpoint base without a trailing slash.
pub(crate) fn build_client(
    provider: Provider,
    cfg: &LlmModelConfig,
) -> Result<(reqwest::Client, String), AiLlmError> {
    let api_key = cfg
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ProviderError::new(provider, ProviderErrorKind::MissingApiKey))?;

    let endpoint = cfg.endpoint.trim();
    if endpoint.is_empty() || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
    {
        return Err(ProviderError::new(
            provider,
            ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
        )
        .into());
    }

    let timeout = cfg
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(60));

    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ProviderError::new(
                provider,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?,
    );
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?;

    Ok((client, endpoint.trim_end_matches('/').to_string()))
}

/// POSTs `body` as JSON and decodes a JSON response of type `R`.
///
/// Non-2xx responses become [`ProviderErrorKind::HttpStatus`] with a body
/// snippet; undecodable payloads become [`ProviderErrorKind::Decode`] with
/// `expected` appended to the serde message.
pub(crate) async fn post_json<B, R>(
    client: &reqwest::Client,
    provider: Provider,
    url: &str,
    body: &B,
    expected: &str,
) -> Result<R, AiLlmError>
where
    B: serde::Serialize + ?Sized,
    R: serde::de::DeserializeOwned,
{
    let started = std::time::Instant::now();
    let resp = client.post(url).json(body).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let snippet = crate::error_handler::make_snippet(&text);

        tracing::error!(
            %provider,
            %status,
            %url,
            %snippet,
            latency_ms = started.elapsed().as_millis(),
            "provider returned non-success status"
        );

        return Err(ProviderError::new(
            provider,
            ProviderErrorKind::HttpStatus(crate::error_handler::HttpError {
                status,
                url: url.to_string(),
                snippet,
            }),
        )
        .into());
    }

    match resp.json::<R>().await {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::error!(
                %provider,
                %url,
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode provider response"
            );
            Err(ProviderError::new(
                provider,
                ProviderErrorKind::Decode(format!("serde error: {e}; expected `{expected}`")),
            )
            .into())
        }
    }
}

/// One-shot local HTTP server answering a canned response.
#[cfg(test)]
pub(crate) mod mock_http {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    fn header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    fn content_length(head: &str) -> usize {
        head.lines()
            .map(str::to_ascii_lowercase)
            .find_map(|l| l.strip_prefix("content-length:")?.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Serves exactly one request with `status` (e.g. `"200 OK"`) and a JSON
    /// `body`, then closes. Returns the base URL.
    pub(crate) async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = sock.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(end) = header_end(&buf) {
                    let head = String::from_utf8_lossy(&buf[..end]).to_string();
                    if buf.len() >= end + 4 + content_length(&head) {
                        break;
                    }
                }
            }

            let resp = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
        });

        format!("http://{addr}")
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::config::llm_provider::LlmProvider;

    #[derive(Debug, Deserialize)]
    struct Reply {
        #[allow(dead_code)]
        text: String,
    }

    fn client_for(base: &str) -> reqwest::Client {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Cohere,
            model: "command-r".into(),
            endpoint: base.into(),
            api_key: Some("co-test".into()),
            max_tokens: None,
            temperature: None,
            timeout_secs: Some(5),
        };
        build_client(Provider::Cohere, &cfg).unwrap().0
    }

    #[tokio::test]
    async fn non_success_status_carries_body_snippet() {
        let base = mock_http::serve_once(
            "429 Too Many Requests",
            r#"{"message":"trial key rate limit"}"#,
        )
        .await;
        let url = format!("{base}/v1/chat");

        let err = post_json::<_, Reply>(&client_for(&base), Provider::Cohere, &url, &(), "text")
            .await
            .unwrap_err();

        match err {
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::HttpStatus(h),
                ..
            }) => {
                assert_eq!(h.status.as_u16(), 429);
                assert_eq!(h.url, url);
                assert!(h.snippet.contains("trial key rate limit"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let base = mock_http::serve_once("200 OK", r#"{"unexpected":true}"#).await;
        let url = format!("{base}/v1/chat");

        let err = post_json::<_, Reply>(&client_for(&base), Provider::Cohere, &url, &(), "text")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::Decode(ref msg),
                ..
            }) if msg.contains("`text`")
        ));
    }
}
