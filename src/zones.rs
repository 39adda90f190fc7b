//! Zone operations.
//!
//! Zones can be listed, fetched by id, or looked up by hostname through the
//! `/zones?name=` filter. A hostname that matches nothing is a not-found
//! error, unlike an empty plain list.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::CloudflareClient;
use crate::error::Error;
use crate::transport::Transport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// How to identify the zone to fetch. When both an id and a hostname are
/// supplied, the id takes precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneSelector {
    Id(String),
    Hostname(String),
}

impl ZoneSelector {
    pub fn resolve(zone_id: Option<String>, hostname: Option<String>) -> Result<Self, Error> {
        let zone_id = zone_id.filter(|s| !s.is_empty());
        let hostname = hostname.filter(|s| !s.is_empty());

        match (zone_id, hostname) {
            (Some(id), _) => Ok(ZoneSelector::Id(id)),
            (None, Some(name)) => Ok(ZoneSelector::Hostname(name)),
            (None, None) => Err(Error::Configuration(
                "either a zone ID or a hostname is required".to_string(),
            )),
        }
    }
}

impl<T: Transport> CloudflareClient<T> {
    /// List all zones the token can see.
    pub async fn list_zones(&self) -> Result<Vec<Zone>, Error> {
        self.call(Method::GET, "/zones").await?.into_list()
    }

    /// Fetch a zone by id or hostname.
    pub async fn get_zone(&self, selector: &ZoneSelector) -> Result<Zone, Error> {
        match selector {
            ZoneSelector::Id(id) => {
                info!(zone_id = %id, "fetching zone by ID");
                let path = format!("/zones/{id}");
                self.call(Method::GET, &path).await?.require_result()
            }
            ZoneSelector::Hostname(hostname) => {
                info!(hostname = %hostname, "fetching zone by hostname");
                let path = format!("/zones?name={}", urlencoding::encode(hostname));
                let zones: Vec<Zone> = self.call(Method::GET, &path).await?.into_list()?;

                zones.into_iter().next().ok_or_else(|| {
                    Error::NotFound(format!("zone not found for hostname: {hostname}"))
                })
            }
        }
    }
}
