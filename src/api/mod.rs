/// Backend access for the document question-answering service.
///
/// # Architecture
///
/// - `Backend` - the two calls the client makes (`/ask`, `/upload`)
/// - `http` - reqwest implementation against a running server
///
/// Controllers only see `dyn Backend`, so tests substitute an in-process fake.
mod http;

pub use http::{HttpBackend, parse_ask_response, parse_upload_response};

use crate::types::{AskResult, UploadFile, UploadResult};
use async_trait::async_trait;
use serde::Serialize;

pub const ENDPOINTS: [&str; 2] = ["/ask", "/upload"];

/// Any failure to complete an exchange or read its response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AskRequest {
    pub query: String,
    pub top_k: u32,
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn ask(&self, request: &AskRequest) -> ApiResult<AskResult>;
    async fn upload(&self, file: &UploadFile) -> ApiResult<UploadResult>;
}
