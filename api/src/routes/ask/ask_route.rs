//! POST / — answers a question in the persona's voice.

use std::sync::Arc;

use axum::{Json, extract::State};
use contextor::{AskOptions, QaAnswer, ask_with_opts};
use tracing::{debug, info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:10000/ \
///   -H 'content-type: application/json' \
///   -d '{"question":"What do you do for fun?"}'
/// ```
#[instrument(name = "ask_route", skip_all, fields(question_len = body.question.len()))]
pub async fn ask_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    let QaAnswer { answer, context } = ask_with_opts(
        &state.store,
        state.llm.as_ref(),
        &body.question,
        AskOptions::default(),
    )
    .await?;

    debug!(used_chunks = context.len(), "context used");
    info!(answer_len = answer.len(), "question answered");

    Ok(Json(AskResponse { response: answer }))
}
