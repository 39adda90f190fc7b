//! DNS record operations.
//!
//! CRUD plus the two non-trivial behaviors: idempotent upsert
//! (lookup-by-name-and-type, then create or update) and batch submission
//! (one POST carrying creates, updates, and deletes together).

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::CloudflareClient;
use crate::error::Error;
use crate::transport::Transport;

/// A DNS record as returned by the API. `id` is server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

/// Full field set for creating a record (and for the upsert body).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSpec {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl RecordSpec {
    /// A record spec with the API defaults: ttl 1 ("auto"), not proxied.
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            content: content.into(),
            ttl: 1,
            proxied: false,
        }
    }
}

/// Partial update body. A key is serialized if and only if the field was
/// supplied; omitted fields are left untouched by the server, never sent as
/// `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// One update entry of a batch: a record id plus the fields to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPatch {
    pub id: String,
    #[serde(flatten)]
    pub fields: RecordPatch,
}

/// Heterogeneous batch of record operations. Each list is independently
/// optional; an empty batch is a valid no-op request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub creates: Vec<RecordSpec>,
    #[serde(default)]
    pub updates: Vec<BatchPatch>,
    #[serde(default)]
    pub deletes: Vec<String>,
}

/// Wire shape of the batch endpoint. All three keys are always present —
/// the server requires them even when empty.
#[derive(Serialize)]
struct BatchBody<'a> {
    posts: &'a [RecordSpec],
    patches: &'a [BatchPatch],
    deletes: Vec<DeleteRef<'a>>,
}

#[derive(Serialize)]
struct DeleteRef<'a> {
    id: &'a str,
}

impl BatchRequest {
    fn body(&self) -> BatchBody<'_> {
        BatchBody {
            posts: &self.creates,
            patches: &self.updates,
            deletes: self.deletes.iter().map(|id| DeleteRef { id }).collect(),
        }
    }
}

/// Batch outcome: top-level success plus the server's per-item results,
/// exposed opaquely rather than reinterpreted.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub success: bool,
    pub result: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertAction {
    Created,
    Updated,
}

impl std::fmt::Display for UpsertAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertAction::Created => write!(f, "created"),
            UpsertAction::Updated => write!(f, "updated"),
        }
    }
}

/// Result of an upsert: the final record plus which branch executed.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertOutcome {
    pub record: DnsRecord,
    pub action: UpsertAction,
}

#[derive(Debug, Deserialize)]
struct DeletedId {
    id: String,
}

impl<T: Transport> CloudflareClient<T> {
    /// Fetch a single DNS record by id.
    pub async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord, Error> {
        let path = format!("/zones/{zone_id}/dns_records/{record_id}");
        self.call(Method::GET, &path).await?.require_result()
    }

    /// List all DNS records in a zone. An empty zone yields an empty list.
    pub async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, Error> {
        let path = format!("/zones/{zone_id}/dns_records");
        self.call(Method::GET, &path).await?.into_list()
    }

    /// Create a DNS record. The server assigns the id.
    pub async fn create_record(
        &self,
        zone_id: &str,
        spec: &RecordSpec,
    ) -> Result<DnsRecord, Error> {
        info!(
            name = %spec.name,
            record_type = %spec.record_type,
            "creating DNS record"
        );

        let path = format!("/zones/{zone_id}/dns_records");
        let record: DnsRecord = self
            .call_json(Method::POST, &path, spec)
            .await?
            .require_result()?;

        info!(record_id = %record.id, "DNS record created");
        Ok(record)
    }

    /// Partially update a DNS record. Only supplied fields appear in the
    /// PATCH body; the server preserves the rest.
    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> Result<DnsRecord, Error> {
        info!(record_id, "updating DNS record");

        let path = format!("/zones/{zone_id}/dns_records/{record_id}");
        self.call_json(Method::PATCH, &path, patch)
            .await?
            .require_result()
    }

    /// Delete a DNS record by id. Returns the deleted id as confirmation.
    pub async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<String, Error> {
        info!(record_id, "deleting DNS record");

        let path = format!("/zones/{zone_id}/dns_records/{record_id}");
        let deleted: DeletedId = self
            .call(Method::DELETE, &path)
            .await?
            .require_result()?;

        Ok(deleted.id)
    }

    /// Create the record if no record with the same name and type exists,
    /// otherwise update the existing one with the full field set.
    ///
    /// When the lookup matches more than one record, the first element in
    /// the server's returned order is updated and the rest are ignored; the
    /// provider documents no ordering guarantee for that case.
    pub async fn upsert_record(
        &self,
        zone_id: &str,
        spec: &RecordSpec,
    ) -> Result<UpsertOutcome, Error> {
        let lookup_path = format!(
            "/zones/{zone_id}/dns_records?name={}&type={}",
            urlencoding::encode(&spec.name),
            urlencoding::encode(&spec.record_type)
        );

        let existing: Vec<DnsRecord> = self
            .call(Method::GET, &lookup_path)
            .await?
            .into_list()?;

        match existing.first() {
            Some(found) => {
                info!(record_id = %found.id, name = %spec.name, "record exists, updating");

                let path = format!("/zones/{zone_id}/dns_records/{}", found.id);
                let record: DnsRecord = self
                    .call_json(Method::PATCH, &path, spec)
                    .await?
                    .require_result()?;

                Ok(UpsertOutcome {
                    record,
                    action: UpsertAction::Updated,
                })
            }
            None => {
                info!(name = %spec.name, "record does not exist, creating");

                let path = format!("/zones/{zone_id}/dns_records");
                let record: DnsRecord = self
                    .call_json(Method::POST, &path, spec)
                    .await?
                    .require_result()?;

                Ok(UpsertOutcome {
                    record,
                    action: UpsertAction::Created,
                })
            }
        }
    }

    /// Submit creates, updates, and deletes as one batch request. Per-item
    /// results are returned opaquely in [`BatchOutcome::result`].
    pub async fn batch_records(
        &self,
        zone_id: &str,
        request: &BatchRequest,
    ) -> Result<BatchOutcome, Error> {
        debug!(
            creates = request.creates.len(),
            updates = request.updates.len(),
            deletes = request.deletes.len(),
            "executing batch DNS operation"
        );

        let path = format!("/zones/{zone_id}/dns_records/batch");
        let result: Option<serde_json::Value> = self
            .call_json(Method::POST, &path, &request.body())
            .await?
            .into_result()?;

        info!("batch DNS operation completed");

        Ok(BatchOutcome {
            success: true,
            result: result.unwrap_or(serde_json::Value::Null),
        })
    }
}
