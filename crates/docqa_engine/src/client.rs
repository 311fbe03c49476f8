use std::time::Duration;

use docqa_logging::{docqa_debug, docqa_info, docqa_warn};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::decode::{decode_answer_response, decode_error_detail, decode_ingest_response};
use crate::{Answer, FailureKind, IngestReceipt, ServiceError};

/// Address of the ingestion/query service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const UPLOAD_PATH: &str = "upload";
const CHAT_PATH: &str = "chat";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` waits for as long as the service takes.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// The two operations of the remote document service.
#[async_trait::async_trait]
pub trait DocQaService: Send + Sync {
    /// `POST /upload` with the document as multipart field `file`.
    async fn ingest(&self, file_name: &str, bytes: &[u8]) -> Result<IngestReceipt, ServiceError>;

    /// `POST /chat` with the question as multipart field `query`.
    async fn ask(&self, query: &str) -> Result<Answer, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    client: reqwest::Client,
    upload_url: Url,
    chat_url: Url,
    max_response_bytes: u64,
}

impl ReqwestService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let base = parse_base_url(&settings.base_url)?;
        let upload_url = join(&base, UPLOAD_PATH)?;
        let chat_url = join(&base, CHAT_PATH)?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            upload_url,
            chat_url,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    async fn post(&self, url: &Url, form: Form) -> Result<Vec<u8>, ServiceError> {
        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: the body only feeds the log message.
            let detail = read_capped(response, self.max_response_bytes)
                .await
                .ok()
                .and_then(|body| decode_error_detail(&body));
            let message = detail.unwrap_or_else(|| status.to_string());
            docqa_warn!("POST {} failed with {}: {}", url, status.as_u16(), message);
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body = read_capped(response, self.max_response_bytes).await?;
        docqa_debug!("POST {} returned {} bytes", url, body.len());
        Ok(body)
    }
}

#[async_trait::async_trait]
impl DocQaService for ReqwestService {
    async fn ingest(&self, file_name: &str, bytes: &[u8]) -> Result<IngestReceipt, ServiceError> {
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let part = Part::bytes(bytes.to_vec())
            .file_name(file_name.to_owned())
            .mime_str(mime.essence_str())
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        let form = Form::new().part("file", part);

        docqa_info!(
            "Uploading file_name={} bytes={} mime={}",
            file_name,
            bytes.len(),
            mime
        );
        let body = self.post(&self.upload_url, form).await?;
        decode_ingest_response(&body)
    }

    async fn ask(&self, query: &str) -> Result<Answer, ServiceError> {
        let form = Form::new().text("query", query.to_owned());

        docqa_info!("Asking query {}", docqa_logging::redact(query));
        let body = self.post(&self.chat_url, form).await?;
        decode_answer_response(&body)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ServiceError> {
    let mut url =
        Url::parse(raw).map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ServiceError::new(
            FailureKind::InvalidUrl,
            format!("not an http(s) base address: {raw}"),
        ));
    }
    // Endpoints are joined relative to the base, so it must end in a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn join(base: &Url, path: &str) -> Result<Url, ServiceError> {
    base.join(path)
        .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
}

async fn read_capped(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, ServiceError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(ServiceError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                },
                "response too large",
            ));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(ServiceError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                },
                "response too large",
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let base = parse_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(join(&base, UPLOAD_PATH).unwrap().as_str(), "http://localhost:8000/api/upload");

        let base = parse_base_url(DEFAULT_BASE_URL).unwrap();
        assert_eq!(join(&base, CHAT_PATH).unwrap().as_str(), "http://localhost:8000/chat");
    }

    #[test]
    fn non_http_base_is_rejected() {
        let err = parse_base_url("mailto:someone@example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);

        let err = parse_base_url("ftp://example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);

        let err = parse_base_url("not a url").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn default_settings_have_no_request_timeout() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert!(settings.request_timeout.is_none());
    }
}
