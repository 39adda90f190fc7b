//! Cloudflare API response envelope.
//!
//! Every v4 API response carries the same wrapper: a success flag, error and
//! message lists, and an optional typed result. Decoding is purely
//! representational; interpretation of `success` happens in the accessors.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One entry of the envelope's `errors` or `messages` lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

/// The uniform wrapper around every API response.
///
/// All fields are optional on the wire; unknown fields are ignored for
/// forward compatibility.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// Interpret the envelope: a failed envelope becomes `Error::Api` and its
    /// `result` is never surfaced, even when present in the payload.
    pub fn into_result(self) -> Result<Option<T>, Error> {
        if !self.success {
            return Err(Error::Api {
                errors: self.errors,
            });
        }
        Ok(self.result)
    }

    /// Like [`into_result`](Self::into_result), but the operation requires a
    /// result: `success: true` with a missing result is also an API error.
    pub fn require_result(self) -> Result<T, Error> {
        if !self.success {
            return Err(Error::Api {
                errors: self.errors,
            });
        }
        self.result.ok_or(Error::Api {
            errors: self.errors,
        })
    }
}

impl<T> Envelope<Vec<T>> {
    /// Collection semantics: an absent result on a successful envelope is an
    /// empty list, not an error.
    pub fn into_list(self) -> Result<Vec<T>, Error> {
        Ok(self.into_result()?.unwrap_or_default())
    }
}
