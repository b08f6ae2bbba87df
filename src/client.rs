use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, StatusCode};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

/// Status and full body of one completed GET exchange.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// One blocking-per-call GET. Workers are generic over this so tests
/// can substitute a deterministic client.
#[async_trait]
pub trait HttpGet {
    async fn get(&self, url: &str) -> Result<FetchedResponse>;
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpClient {
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }
}

#[async_trait]
impl HttpGet for HttpClient {
    async fn get(&self, url: &str) -> Result<FetchedResponse> {
        let request = Request::get(url)
            .body(Full::new(Bytes::new()))
            .context("Failed to build request")?;
        let resp = self
            .client
            .request(request)
            .await
            .context("Failed to send request")?;
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .context("Failed to read response body")?
            .to_bytes();
        Ok(FetchedResponse { status, body })
    }
}
