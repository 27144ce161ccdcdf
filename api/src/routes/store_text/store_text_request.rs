use serde::{Deserialize, Serialize};

/// Request payload for POST /store-text.
#[derive(Debug, Deserialize)]
pub struct StoreTextRequest {
    /// New full contents of the text store. Replaces the previous text.
    pub content: String,
}

/// Response payload for POST /store-text.
#[derive(Debug, Serialize)]
pub struct StoreTextResponse {
    pub message: String,
    /// Location of the text store on the server.
    pub file_path: String,
}
