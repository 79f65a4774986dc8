//! `reqwest` transport for the native CLI.

use crate::error::{ApiError, Result};
use crate::transport::{HttpReply, HttpTransport};
use async_trait::async_trait;
use std::path::Path;

/// A file to post as the `file` part of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Read `path` from disk, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => "text/csv",
            Some("json") => "application/json",
            _ => "application/octet-stream",
        };
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn finish(url: &str, response: reqwest::Response) -> Result<HttpReply> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(HttpReply { status, body })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    type Form = UploadFile;

    async fn get(&self, url: &str) -> Result<HttpReply> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Self::finish(url, response).await
    }

    async fn post_form(&self, url: &str, form: Self::Form) -> Result<HttpReply> {
        let part = reqwest::multipart::Part::bytes(form.bytes)
            .file_name(form.file_name)
            .mime_str(form.mime)
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
        let multipart = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(url)
            .multipart(multipart)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Self::finish(url, response).await
    }
}
