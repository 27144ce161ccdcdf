use serde::{Deserialize, Serialize};

/// Request payload for POST /.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Question for the persona. May be empty.
    pub question: String,
}

/// Response payload for POST /.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Model reply, passed through verbatim.
    pub response: String,
}
