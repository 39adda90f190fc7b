//! Zone-or-account scope resolution.
//!
//! Several operations target either a zone or an account collection. The two
//! identifiers are mutually exclusive and validated once at the boundary,
//! before any network call.

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Zone(String),
    Account(String),
}

impl Scope {
    /// Resolve the two optional identifiers into exactly one scope. Empty
    /// strings count as absent. Both-present and both-absent are
    /// configuration errors.
    pub fn resolve(zone_id: Option<String>, account_id: Option<String>) -> Result<Self, Error> {
        let zone_id = zone_id.filter(|s| !s.is_empty());
        let account_id = account_id.filter(|s| !s.is_empty());

        match (zone_id, account_id) {
            (Some(zone), None) => Ok(Scope::Zone(zone)),
            (None, Some(account)) => Ok(Scope::Account(account)),
            (Some(_), Some(_)) => Err(Error::Configuration(
                "provide either a zone ID or an account ID, not both".to_string(),
            )),
            (None, None) => Err(Error::Configuration(
                "either a zone ID or an account ID is required".to_string(),
            )),
        }
    }

    /// URL path prefix for the scoped collection.
    pub fn path_prefix(&self) -> String {
        match self {
            Scope::Zone(id) => format!("/zones/{id}"),
            Scope::Account(id) => format!("/accounts/{id}"),
        }
    }
}
