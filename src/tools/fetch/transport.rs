use super::client::build_client;
use super::types::{FetchOptions, RawResponse, Transport};
use super::utils::failure_from_reqwest;
use crate::tools::types::{Failure, FailureKind};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;
use url::Url;

/// Production transport backed by a single pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    max_body_bytes: usize,
}

impl ReqwestTransport {
    pub fn new(options: &FetchOptions) -> crate::Result<Self> {
        Ok(Self {
            client: build_client(options)?,
            max_body_bytes: options.max_body_bytes,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn get(&self, url: &Url, timeout: Duration) -> Result<RawResponse, Failure> {
        let mut response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(failure_from_reqwest)?;

        let status = response.status();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Error bodies are never extracted; dropping the response frees the connection.
        if !status.is_success() {
            trace!(%final_url, status = status.as_u16(), "skipping body of non-success response");
            return Ok(RawResponse {
                status: status.as_u16(),
                final_url,
                content_type,
                body: Vec::new(),
            });
        }

        if let Some(len) = response.content_length() {
            if len > self.max_body_bytes as u64 {
                return Err(body_too_large(self.max_body_bytes));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(failure_from_reqwest)? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(body_too_large(self.max_body_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(RawResponse {
            status: status.as_u16(),
            final_url,
            content_type,
            body,
        })
    }
}

fn body_too_large(limit: usize) -> Failure {
    Failure::new(FailureKind::ParseError, format!("body exceeds {limit} bytes"))
}
