//! HTTP client for network-based API calls

use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{ClientConfig, ClientError, ClientResult};

/// MIME type of the spreadsheet templates and exports
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Error body the backend sends with non-2xx statuses
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// A file received from a download endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A file to send to an upload endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// An `.xlsx` workbook
    pub fn spreadsheet(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: XLSX_MIME.to_string(),
            bytes,
        }
    }
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    /// Fetch a binary payload; `fallback_name` is used when the server
    /// sends no usable `Content-Disposition`
    async fn download(
        &self,
        path: &str,
        query: &[(String, String)],
        fallback_name: &str,
    ) -> ClientResult<DownloadedFile>;
    /// Send `file` as the `file` part of a multipart form
    async fn upload<T: DeserializeOwned>(&self, path: &str, file: UploadFile) -> ClientResult<T>;
    fn token(&self) -> Option<&str>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(status_error(status, text))
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "Response body did not match the expected shape");
            ClientError::InvalidResponse(e.to_string())
        })
    }
}

/// Map a non-2xx status to an error, preferring the backend's own message
fn status_error(status: StatusCode, text: String) -> ClientError {
    let body = serde_json::from_str::<ErrorBody>(&text).ok();
    let message = body.as_ref().and_then(|b| b.message.clone());

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message.unwrap_or(text)),
        StatusCode::NOT_FOUND => ClientError::NotFound(message.unwrap_or(text)),
        _ if status.is_client_error() => match (body.and_then(|b| b.success), message) {
            (Some(false), Some(message)) | (None, Some(message)) => ClientError::Business(message),
            _ => ClientError::Internal(format!("{}: {}", status, text)),
        },
        _ => {
            warn!(%status, "Server error");
            ClientError::Internal(format!("{}: {}", status, text))
        }
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<T> {
        debug!(path, params = query.len(), "GET");
        let response = self.send(self.client.get(self.url(path)).query(query)).await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "POST");
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        Self::handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "PUT");
        let response = self.send(self.client.put(self.url(path)).json(body)).await?;
        Self::handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path, "DELETE");
        let response = self.send(self.client.delete(self.url(path))).await?;
        Self::handle_response(response).await
    }

    async fn download(
        &self,
        path: &str,
        query: &[(String, String)],
        fallback_name: &str,
    ) -> ClientResult<DownloadedFile> {
        debug!(path, "GET (download)");
        let response = self.send(self.client.get(self.url(path)).query(query)).await?;
        let headers = response.headers();
        let filename = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| fallback_name.to_string());
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(DownloadedFile {
            filename,
            content_type,
            bytes,
        })
    }

    async fn upload<T: DeserializeOwned>(&self, path: &str, file: UploadFile) -> ClientResult<T> {
        debug!(path, filename = %file.filename, size = file.bytes.len(), "POST (multipart)");
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self.send(self.client.post(self.url(path)).multipart(form)).await?;
        Self::handle_response(response).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Extract the filename from a `Content-Disposition` header value.
///
/// `filename*=UTF-8''...` (RFC 5987) wins over a plain `filename=`.
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for (key, raw) in disposition_params(value) {
        match key.to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = match raw.split_once("''") {
                    Some((_charset, rest)) => rest,
                    None => raw.as_str(),
                };
                extended = percent_decode(encoded);
            }
            "filename" => {
                if !raw.is_empty() {
                    plain = Some(raw);
                }
            }
            _ => {}
        }
    }

    extended.filter(|n| !n.is_empty()).or(plain)
}

/// Split `type; key=value; key="quoted; value"` into unquoted key/value pairs.
/// Separators inside quotes are kept and `\x` escapes yield `x`.
fn disposition_params(value: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = value.chars().peekable();

    loop {
        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c == ';' {
                break;
            }
            key.push(c);
            chars.next();
        }
        let mut raw = String::new();
        if chars.peek() == Some(&'=') {
            chars.next();
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            if chars.peek() == Some(&'"') {
                chars.next();
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => raw.extend(chars.next()),
                        _ => raw.push(c),
                    }
                }
                while chars.peek().is_some_and(|&c| c != ';') {
                    chars.next();
                }
            } else {
                while let Some(&c) = chars.peek() {
                    if c == ';' {
                        break;
                    }
                    raw.push(c);
                    chars.next();
                }
                raw = raw.trim().to_string();
            }
            let key = key.trim();
            if !key.is_empty() {
                params.push((key.to_string(), raw));
            }
        }
        if chars.next().is_none() {
            break;
        }
    }
    params
}

/// Decode RFC 5987 percent-escapes; malformed escapes reject the whole value
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }
    urlencoding::decode(input).ok().map(Cow::into_owned)
}
