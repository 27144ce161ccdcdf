//! GET / — liveness.

use axum::Json;

use crate::core::http::response_envelope::MessageBody;

pub const WELCOME_MESSAGE: &str = "Welcome! Your persona chat backend is running!";

/// Handler: GET /
pub async fn root() -> Json<MessageBody> {
    Json(MessageBody {
        message: WELCOME_MESSAGE.into(),
    })
}
