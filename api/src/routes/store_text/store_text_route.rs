//! POST /store-text — replaces the stored text and rebuilds the index.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::store_text::store_text_request::{StoreTextRequest, StoreTextResponse},
};

pub const STORED_MESSAGE: &str = "Text stored successfully";

/// Handler: POST /store-text
///
/// The file is overwritten first; if re-indexing then fails the handler
/// answers 500 and the previous index stays live.
#[instrument(name = "store_text_route", skip_all, fields(content_len = body.content.len()))]
pub async fn store_text_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StoreTextRequest>,
) -> AppResult<Json<StoreTextResponse>> {
    let chunks = state.store.store_text(&body.content).await?;
    let file_path = state.store.file_path().display().to_string();

    info!(chunks, path = %file_path, "text stored and indexed");

    Ok(Json(StoreTextResponse {
        message: STORED_MESSAGE.into(),
        file_path,
    }))
}
