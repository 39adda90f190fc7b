//! Cache purge.
//!
//! A purge targets exactly one of: everything, a file list, or a tag list.
//! The target is selected by first-match priority and validated before any
//! request is built; an invalid configuration never reaches the network.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::CloudflareClient;
use crate::error::Error;
use crate::transport::Transport;

/// Purge configuration. `purge_all` wins over `files`, which wins over
/// `tags`; at least one must be set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurgeRequest {
    #[serde(default)]
    pub purge_all: bool,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PurgeRequest {
    pub fn everything() -> Self {
        Self {
            purge_all: true,
            ..Default::default()
        }
    }

    pub fn files(files: Vec<String>) -> Self {
        Self {
            files,
            ..Default::default()
        }
    }

    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            tags,
            ..Default::default()
        }
    }

    /// Select the single body shape, or fail locally when none applies.
    fn body(&self) -> Result<PurgeBody<'_>, Error> {
        if self.purge_all {
            Ok(PurgeBody::Everything {
                purge_everything: true,
            })
        } else if !self.files.is_empty() {
            Ok(PurgeBody::Files { files: &self.files })
        } else if !self.tags.is_empty() {
            Ok(PurgeBody::Tags { tags: &self.tags })
        } else {
            Err(Error::Configuration(
                "invalid purge configuration: provide purge_all, a non-empty file list, \
                 or a non-empty tag list"
                    .to_string(),
            ))
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum PurgeBody<'a> {
    Everything { purge_everything: bool },
    Files { files: &'a [String] },
    Tags { tags: &'a [String] },
}

/// Purge confirmation: the provider's request id.
#[derive(Debug, Clone, Serialize)]
pub struct PurgeOutcome {
    pub request_id: String,
}

#[derive(Debug, Deserialize)]
struct PurgeResult {
    id: String,
}

impl<T: Transport> CloudflareClient<T> {
    /// Purge the zone's cache per the request's target selection.
    pub async fn purge_cache(
        &self,
        zone_id: &str,
        request: &PurgeRequest,
    ) -> Result<PurgeOutcome, Error> {
        // Validation gate: must run before request construction.
        let body = request.body()?;

        match &body {
            PurgeBody::Everything { .. } => info!(zone_id, "purging entire cache"),
            PurgeBody::Files { files } => {
                info!(zone_id, count = files.len(), "purging files from cache")
            }
            PurgeBody::Tags { tags } => {
                info!(zone_id, count = tags.len(), "purging cache tags")
            }
        }

        let path = format!("/zones/{zone_id}/purge_cache");
        let result: PurgeResult = self
            .call_json(Method::POST, &path, &body)
            .await?
            .require_result()?;

        Ok(PurgeOutcome {
            request_id: result.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purge_all_takes_priority() {
        let request = PurgeRequest {
            purge_all: true,
            files: vec!["https://example.com/app.js".to_string()],
            tags: vec!["tag1".to_string()],
        };

        let json = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"purge_everything": true}));
    }

    #[test]
    fn files_take_priority_over_tags() {
        let request = PurgeRequest {
            purge_all: false,
            files: vec!["https://example.com/app.js".to_string()],
            tags: vec!["tag1".to_string()],
        };

        let json = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"files": ["https://example.com/app.js"]})
        );
    }

    #[test]
    fn tags_used_when_nothing_else_set() {
        let request = PurgeRequest::tags(vec!["tag1".to_string()]);
        let json = serde_json::to_value(request.body().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"tags": ["tag1"]}));
    }

    #[test]
    fn empty_configuration_fails_locally() {
        let request = PurgeRequest::default();
        assert!(matches!(
            request.body(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn empty_lists_do_not_count_as_targets() {
        let request = PurgeRequest {
            purge_all: false,
            files: vec![],
            tags: vec![],
        };
        assert!(request.body().is_err());
    }
}
