use super::{ApiResult, AskRequest, Backend};
use crate::config::ClientConfig;
use crate::types::{AskResult, UploadFile, UploadResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

const UPLOAD_FIELD: &str = "file";
const UNKNOWN: &str = "?";

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The server answers with JSON even on failures, so the status is only
    /// logged and the body is always handed to the parser.
    async fn read_body(&self, response: reqwest::Response, what: &str) -> ApiResult<String> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(%status, "{what} returned a non-success status");
        }
        Ok(body)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn ask(&self, request: &AskRequest) -> ApiResult<AskResult> {
        let url = self.url("/ask");
        tracing::debug!(%url, top_k = request.top_k, "asking question");

        let response = self.client.post(&url).json(request).send().await?;
        let body = self.read_body(response, "ask").await?;
        parse_ask_response(&body)
    }

    async fn upload(&self, file: &UploadFile) -> ApiResult<UploadResult> {
        let url = self.url("/upload");
        tracing::debug!(%url, name = %file.name, bytes = file.bytes.len(), "uploading file");

        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);
        let response = self.client.post(&url).multipart(form).send().await?;
        let body = self.read_body(response, "upload").await?;
        let result = parse_upload_response(&body)?;
        tracing::info!(name = %file.name, ?result, "upload finished");
        Ok(result)
    }
}

pub fn parse_ask_response(body: &str) -> ApiResult<AskResult> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Default, Deserialize)]
struct UploadFields {
    #[serde(default)]
    ok: bool,
    chunks: Option<u64>,
    ftype: Option<String>,
    bytes: Option<u64>,
    error: Option<String>,
    preview: Option<String>,
}

/// Single-file replies carry the fields at the top level; batch replies nest
/// one entry per file under `details`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(flatten)]
    top: UploadFields,
    #[serde(default)]
    details: Vec<UploadFields>,
}

impl From<UploadFields> for UploadResult {
    fn from(fields: UploadFields) -> Self {
        if fields.ok {
            UploadResult::Indexed {
                chunks: fields.chunks.unwrap_or_default(),
                ftype: fields.ftype.unwrap_or_else(|| UNKNOWN.to_string()),
                bytes: fields.bytes.unwrap_or_default(),
            }
        } else {
            UploadResult::Rejected {
                error: fields.error.unwrap_or_else(|| UNKNOWN.to_string()),
                bytes: fields.bytes,
                ftype: fields.ftype,
                preview: fields.preview,
            }
        }
    }
}

pub fn parse_upload_response(body: &str) -> ApiResult<UploadResult> {
    let response: UploadResponse = serde_json::from_str(body)?;
    let UploadResponse { top, details } = response;

    let fields = if top.chunks.is_none() && top.error.is_none() {
        details.into_iter().next().unwrap_or(top)
    } else {
        top
    };
    Ok(fields.into())
}
