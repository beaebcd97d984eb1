use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;

use crate::request::{PageRequest, PageResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Performs the network round trip for a [`PageRequest`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &PageRequest) -> Result<PageResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            bail!("request timeout must be greater than zero");
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &PageRequest) -> Result<PageResponse> {
        let headers = header_map(request)?;
        let res = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(headers)
            .send()
            .await?;

        let status = res.status().as_u16();
        tracing::debug!(url = %request.url, status, "received response");

        // The body of a rejected page is never printed, so it is not read.
        let body = if res.status() == StatusCode::OK {
            res.text().await?
        } else {
            String::new()
        };
        Ok(PageResponse { status, body })
    }
}

fn header_map(request: &PageRequest) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(request.headers.len());
    for (name, value) in &request.headers {
        let name = HeaderName::from_bytes(name.as_ref().as_bytes())?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header {}", name))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
