//! Error taxonomy for the Cloudflare client.
//!
//! Every operation fails with exactly one of these variants. Nothing is
//! retried or defaulted inside the library; errors propagate to the caller.

use thiserror::Error;

use crate::envelope::ApiMessage;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing input, detected before any network call.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Connection, TLS, or timeout failure from the underlying HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response bytes did not parse as the expected envelope shape.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope reported `success: false`, or a mandatory result was
    /// missing. Carries the provider's error list verbatim.
    #[error("Cloudflare API error: {}", format_messages(.errors))]
    Api { errors: Vec<ApiMessage> },

    /// A lookup legitimately matched nothing where one match was required.
    #[error("not found: {0}")]
    NotFound(String),
}

fn format_messages(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "no error details provided".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} (code {})", e.message, e.code))
        .collect::<Vec<_>>()
        .join(", ")
}
