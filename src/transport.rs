//! HTTP transport boundary.
//!
//! Operations describe a request fully before it hits the wire; the
//! [`Transport`] trait is the only seam through which the network is reached.
//! Status codes are carried back but never drive control flow — branching
//! happens on the envelope's `success` flag.

use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

use crate::error::Error;

/// One outbound API call, fully described: method, absolute URL, headers,
/// and an optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Raw response from the transport: status plus body bytes.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The narrow interface the client calls through. Connection, TLS, and
/// timeout failures surface as [`Error::Transport`]; any response with a
/// body, including 4xx/5xx, is returned for envelope decoding.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error>;
}

/// Default transport backed by `reqwest` with a 30 second timeout.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "response received");

        Ok(ApiResponse { status, body })
    }
}
