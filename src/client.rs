//! Cloudflare API client core.
//!
//! Holds the credentials and the transport, builds authenticated requests,
//! and decodes the response envelope. Resource operations live in the
//! `dns`, `cache`, `access`, and `zones` modules as `impl` blocks on
//! [`CloudflareClient`].

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::envelope::Envelope;
use crate::error::Error;
use crate::transport::{ApiRequest, HttpTransport, Transport};

pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Typed Cloudflare v4 API client.
///
/// Stateless between calls: each operation issues its own request(s) and
/// holds no cached remote state, so concurrent callers need no coordination.
pub struct CloudflareClient<T: Transport = HttpTransport> {
    transport: T,
    api_token: String,
    base_url: String,
}

impl CloudflareClient<HttpTransport> {
    /// Create a client with the default HTTP transport and base URL.
    pub fn new(api_token: impl Into<String>) -> Result<Self, Error> {
        Ok(Self::with_transport(HttpTransport::new()?, api_token))
    }
}

impl<T: Transport> CloudflareClient<T> {
    /// Create a client over a caller-supplied transport.
    pub fn with_transport(transport: T, api_token: impl Into<String>) -> Self {
        Self {
            transport,
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL. The path of each operation is concatenated
    /// verbatim, so the base URL should not end with a slash.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiRequest {
        ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.api_token),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }

    /// Issue a bodyless request and decode the envelope.
    pub(crate) async fn call<R>(&self, method: Method, path: &str) -> Result<Envelope<R>, Error>
    where
        R: DeserializeOwned,
    {
        self.dispatch(method, path, None).await
    }

    /// Issue a request with a JSON body and decode the envelope.
    pub(crate) async fn call_json<B, R>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Envelope<R>, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.dispatch(method, path, Some(body)).await
    }

    async fn dispatch<R>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Envelope<R>, Error>
    where
        R: DeserializeOwned,
    {
        debug!(%method, path, "Cloudflare API call");

        let request = self.build_request(method, path, body);
        let response = self.transport.send(request).await?;

        // 4xx/5xx responses still carry an envelope; only the success flag
        // drives branching.
        let envelope = serde_json::from_slice(&response.body)?;
        Ok(envelope)
    }
}
