use serde::{Deserialize, Serialize};

/// Body of every error response: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailBody {
    pub detail: String,
}

impl DetailBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Plain `{"message": "..."}` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}
