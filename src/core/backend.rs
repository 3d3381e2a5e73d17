use async_trait::async_trait;
use reqwest::multipart;
use std::error::Error as StdError;
use std::fmt;

use crate::api::{error_summary, extract_error_message, ChatReply, ChatRequest, UploadResponse};
use crate::core::config::Config;

#[derive(Debug)]
pub enum BackendError {
    /// Transport-level failure (connect, timeout, body decode).
    Request(reqwest::Error),
    /// Non-success HTTP status, message pulled from the response body.
    Api { status: u16, message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Request(source) => write!(f, "{source}"),
            BackendError::Api { message, .. } => write!(f, "{message}"),
        }
    }
}

impl StdError for BackendError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            BackendError::Request(source) => Some(source),
            BackendError::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(source: reqwest::Error) -> Self {
        BackendError::Request(source)
    }
}

/// Transport seam between the chat loop and the remote service. The chat
/// loop only ever sees this trait, so tests drive it with a scripted
/// implementation instead of a live server.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send_query(&self, query: &str) -> Result<ChatReply, BackendError>;

    async fn upload(&self, file_name: &str, bytes: Vec<u8>)
        -> Result<UploadResponse, BackendError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    chat_url: String,
    upload_url: String,
}

impl HttpBackend {
    pub fn new(chat_url: String, upload_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            chat_url,
            upload_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.effective_chat_url(), config.effective_upload_url())
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send_query(&self, query: &str) -> Result<ChatReply, BackendError> {
        let response = self
            .client
            .post(&self.chat_url)
            .json(&ChatRequest {
                query: query.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body, status.as_u16()),
            });
        }

        Ok(response.json::<ChatReply>().await?)
    }

    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, BackendError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(&self.upload_url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_summary(&body)
                    .unwrap_or_else(|| format!("Upload failed. Status: {}", status.as_u16())),
            });
        }

        Ok(response.json::<UploadResponse>().await?)
    }
}
