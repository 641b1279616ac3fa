use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::errors::{EmbedSuError, Result};

/// the network edge of the extractor: fetch a url, get its body as text.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &str, headers: &HeaderMap) -> Result<String>;
}

/// [`Transport`] backed by reqwest with a uniform per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(EmbedSuError::BuildClient)?;

        Ok(Self { client })
    }

    async fn ensure_success(response: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read error body>".to_string());

        Err(EmbedSuError::HttpStatus {
            context: context.to_string(),
            status,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str, headers: &HeaderMap) -> Result<String> {
        debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|source| EmbedSuError::Request {
                context: format!("requesting {url}"),
                source,
            })?;

        let resp = Self::ensure_success(resp, url).await?;

        resp.text()
            .await
            .map_err(|source| EmbedSuError::ResponseBody {
                context: format!("reading {url}"),
                source,
            })
    }
}
