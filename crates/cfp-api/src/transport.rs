use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};

use crate::error::FetchError;

/// One raw GET against a fully-formed URL. The seam between the retry
/// machinery and the actual network, so tests can script responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String, FetchError>;
}

/// Production transport over `reqwest` with per-call timeout, a fixed
/// User-Agent, and optional Cookie passthrough.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        cookie_header: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = cookie_header {
            headers.insert(
                COOKIE,
                HeaderValue::from_str(cookie).context("cookie header contains invalid bytes")?,
            );
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Service(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::Service(format!("http status {status}")));
        }

        // 4xx bodies still carry the API's JSON failure envelope, so the
        // body is returned for the caller to interpret either way.
        response
            .text()
            .await
            .map_err(|e| FetchError::Service(e.to_string()))
    }
}
