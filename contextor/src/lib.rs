//! RAG + LLM gateway: retrieve, compose, complete.
//!
//! Public API: [`ask`] and [`ask_with_opts`]. The question is embedded and
//! matched against the current index of the [`RagStore`], the hits are
//! interpolated into the fixed persona template ([`prompt::PERSONA_TEMPLATE`]),
//! and the composed prompt goes to the chat model in a single call.

mod api_types;
mod error;
pub mod llm;
pub mod prompt;

pub use api_types::{AskOptions, QaAnswer, UsedChunk};
pub use error::ContextorError;
pub use llm::{CompletionFuture, CompletionProvider};

use rag_store::{RagQuery, RagStore};
use tracing::{debug, instrument};

/// Ask the LLM with RAG augmentation and get the answer as plain text.
///
/// Convenience wrapper over [`ask_with_opts`] with default options.
pub async fn ask(
    store: &RagStore,
    llm: &dyn CompletionProvider,
    question: &str,
) -> Result<String, ContextorError> {
    let qa = ask_with_opts(store, llm, question, AskOptions::default()).await?;
    Ok(qa.answer)
}

/// Ask the LLM with RAG augmentation and get both answer and used context.
///
/// Nothing is retried; the first failing step aborts the whole call.
///
/// # Errors
/// - [`ContextorError::Rag`] if embedding the question or ranking fails
/// - [`ContextorError::Llm`] if the completion call fails
pub async fn ask_with_opts(
    store: &RagStore,
    llm: &dyn CompletionProvider,
    question: &str,
    opts: AskOptions,
) -> Result<QaAnswer, ContextorError> {
    let top_k = if opts.top_k == 0 {
        store.config().top_k
    } else {
        opts.top_k
    };

    // 1) Retrieve
    let hits = retrieve(store, question, top_k).await?;

    // 2) Compose
    let context = prompt::join_context(&hits);
    let composed = prompt::compose(&context, question);
    debug!(
        hits = hits.len(),
        context_len = context.len(),
        prompt_len = composed.len(),
        "prompt composed"
    );

    // 3) Complete
    let answer = llm.complete(&composed).await?;

    let context = hits
        .into_iter()
        .map(|h| UsedChunk {
            score: h.score,
            text: h.text,
        })
        .collect();

    Ok(QaAnswer { answer, context })
}

#[instrument(skip(store, question), fields(question_len = question.len()))]
async fn retrieve(
    store: &RagStore,
    question: &str,
    top_k: usize,
) -> Result<Vec<rag_store::RagHit>, ContextorError> {
    let hits = store
        .rag_context(RagQuery {
            text: question,
            top_k,
        })
        .await?;
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ai_llm_service::{Provider, ProviderError, ProviderErrorKind};
    use rag_store::{EmbedFuture, EmbedPurpose, EmbeddingsProvider, RagConfig};

    use super::*;

    struct ConstEmbedder;

    impl EmbeddingsProvider for ConstEmbedder {
        fn embed<'a>(&'a self, _text: &'a str, _purpose: EmbedPurpose) -> EmbedFuture<'a> {
            Box::pin(async { Ok(vec![1.0, 0.5]) })
        }
    }

    #[derive(Default)]
    struct RecordingLlm {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl CompletionProvider for RecordingLlm {
        fn complete<'a>(&'a self, prompt: &'a str) -> CompletionFuture<'a> {
            Box::pin(async move {
                self.prompts.lock().unwrap().push(prompt.to_string());
                if self.fail {
                    return Err(ProviderError::new(
                        Provider::Cohere,
                        ProviderErrorKind::Decode("model exploded".into()),
                    )
                    .into());
                }
                Ok("Chess, mostly.".to_string())
            })
        }
    }

    async fn store(dir: &tempfile::TempDir) -> RagStore {
        let cfg = RagConfig::new_default(dir.path().join("base.txt"));
        RagStore::open(cfg, Arc::new(ConstEmbedder)).await.unwrap()
    }

    #[tokio::test]
    async fn stored_text_reaches_the_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store.store_text("Piyush likes chess.").await.unwrap();
        let llm = RecordingLlm::default();

        let qa = ask_with_opts(&store, &llm, "What does Piyush like?", AskOptions::default())
            .await
            .unwrap();

        assert_eq!(qa.answer, "Chess, mostly.");
        assert_eq!(qa.context.len(), 1);
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("### Retrieved Context:\nPiyush likes chess."));
        assert!(prompts[0].contains("What does Piyush like?"));
    }

    #[tokio::test]
    async fn empty_store_still_asks_with_empty_context() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let llm = RecordingLlm::default();

        let answer = ask(&store, &llm, "Hello?").await.unwrap();

        assert_eq!(answer, "Chess, mostly.");
        assert!(llm.prompts.lock().unwrap()[0].contains("### Retrieved Context:\n\n"));
    }

    #[tokio::test]
    async fn completion_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let llm = RecordingLlm {
            fail: true,
            ..Default::default()
        };

        let err = ask(&store, &llm, "Hello?").await.unwrap_err();
        assert!(matches!(err, ContextorError::Llm(_)));
        assert!(err.to_string().contains("model exploded"));
    }
}
