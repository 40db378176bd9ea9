//! HTTP adapter for the city-discussion backend.
//!
//! Implements `NewsPort`, `DiscussionPort` and `HealthPort` against a configurable base URL:
//! - `GET  {base}/fetch-news/?city=...`  -> `{ "top_news": [...] }`
//! - `POST {base}/fetch-comments/`       -> comments + summary/sentiment/actionable_needs
//! - `GET  {base}/health`

use crate::domain::{Discussion, DomainError};
use crate::ports::{DiscussionPort, HealthPort, NewsPort};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Backend client. One `reqwest::Client` shared by all requests (connection pooling).
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for `base_url` (e.g. "http://127.0.0.1:8000"). A trailing slash is ignored.
    ///
    /// # Errors
    /// Returns `DomainError::Config` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check status, then decode the body. Non-2xx and undecodable bodies both fail.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DomainError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, body = %text, "backend returned error");
            return Err(DomainError::Backend {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %text.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Decode(e.to_string())
        })
    }
}

fn transport(e: reqwest::Error) -> DomainError {
    DomainError::Transport(format!("HTTP request failed: {}", e))
}

#[derive(Deserialize)]
struct NewsResponse {
    top_news: Vec<String>,
}

#[derive(Serialize)]
struct CommentsRequest<'a> {
    topic: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
}

#[async_trait::async_trait]
impl NewsPort for BackendClient {
    async fn fetch_top_news(&self, city: &str) -> Result<Vec<String>, DomainError> {
        debug!(city = %city, "GET /fetch-news/");
        let response = self
            .client
            .get(self.url("/fetch-news/"))
            .query(&[("city", city)])
            .send()
            .await
            .map_err(transport)?;
        let body: NewsResponse = Self::decode(response).await?;
        Ok(body.top_news)
    }
}

#[async_trait::async_trait]
impl DiscussionPort for BackendClient {
    async fn fetch_discussion(
        &self,
        topic: &str,
        city: Option<&str>,
    ) -> Result<Discussion, DomainError> {
        debug!(topic = %topic, "POST /fetch-comments/");
        let response = self
            .client
            .post(self.url("/fetch-comments/"))
            .json(&CommentsRequest { topic, city })
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }
}

#[async_trait::async_trait]
impl HealthPort for BackendClient {
    async fn check_health(&self) -> Result<(), DomainError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(transport)?;
        let _: serde_json::Value = Self::decode(response).await?;
        Ok(())
    }
}
