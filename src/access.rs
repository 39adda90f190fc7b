//! IP access rules.
//!
//! Firewall rules that block, challenge, or whitelist traffic by IP, IP
//! range, ASN, or country. Rules live under either a zone or an account,
//! selected through [`Scope`].

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::CloudflareClient;
use crate::error::Error;
use crate::scope::Scope;
use crate::transport::Transport;

const RULES_PATH: &str = "/firewall/access_rules/rules";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRuleMode {
    Block,
    Challenge,
    Whitelist,
    JsChallenge,
    ManagedChallenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRuleTarget {
    Ip,
    IpRange,
    Asn,
    Country,
}

impl FromStr for AccessRuleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Self::Block),
            "challenge" => Ok(Self::Challenge),
            "whitelist" => Ok(Self::Whitelist),
            "js_challenge" => Ok(Self::JsChallenge),
            "managed_challenge" => Ok(Self::ManagedChallenge),
            other => Err(Error::Configuration(format!(
                "unknown access rule mode '{other}' (expected block, challenge, whitelist, \
                 js_challenge, or managed_challenge)"
            ))),
        }
    }
}

impl FromStr for AccessRuleTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ip" => Ok(Self::Ip),
            "ip_range" => Ok(Self::IpRange),
            "asn" => Ok(Self::Asn),
            "country" => Ok(Self::Country),
            other => Err(Error::Configuration(format!(
                "unknown access rule target '{other}' (expected ip, ip_range, asn, or country)"
            ))),
        }
    }
}

impl fmt::Display for AccessRuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Block => "block",
            Self::Challenge => "challenge",
            Self::Whitelist => "whitelist",
            Self::JsChallenge => "js_challenge",
            Self::ManagedChallenge => "managed_challenge",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for AccessRuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ip => "ip",
            Self::IpRange => "ip_range",
            Self::Asn => "asn",
            Self::Country => "country",
        };
        write!(f, "{s}")
    }
}

/// The target of a rule: what to match and the value to match against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRuleConfiguration {
    pub target: AccessRuleTarget,
    pub value: String,
}

/// An access rule as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRule {
    pub id: String,
    pub mode: AccessRuleMode,
    pub configuration: AccessRuleConfiguration,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Input for creating a rule.
#[derive(Debug, Clone)]
pub struct AccessRuleSpec {
    pub mode: AccessRuleMode,
    pub target: AccessRuleTarget,
    pub value: String,
    pub notes: Option<String>,
}

#[derive(Serialize)]
struct AccessRuleBody<'a> {
    mode: AccessRuleMode,
    configuration: ConfigurationBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Serialize)]
struct ConfigurationBody<'a> {
    target: AccessRuleTarget,
    value: &'a str,
}

impl<T: Transport> CloudflareClient<T> {
    /// Create an IP access rule in the given scope.
    pub async fn create_access_rule(
        &self,
        scope: &Scope,
        spec: &AccessRuleSpec,
    ) -> Result<AccessRule, Error> {
        info!(
            mode = %spec.mode,
            target = %spec.target,
            value = %spec.value,
            "creating access rule"
        );

        let body = AccessRuleBody {
            mode: spec.mode,
            configuration: ConfigurationBody {
                target: spec.target,
                value: &spec.value,
            },
            notes: spec.notes.as_deref(),
        };

        let path = format!("{}{RULES_PATH}", scope.path_prefix());
        let rule: AccessRule = self
            .call_json(Method::POST, &path, &body)
            .await?
            .require_result()?;

        info!(rule_id = %rule.id, "access rule created");
        Ok(rule)
    }

    /// Delete an access rule by id. Returns the deleted id.
    pub async fn delete_access_rule(&self, scope: &Scope, rule_id: &str) -> Result<String, Error> {
        info!(rule_id, "deleting access rule");

        let path = format!("{}{RULES_PATH}/{rule_id}", scope.path_prefix());
        let _: Option<serde_json::Value> = self.call(Method::DELETE, &path).await?.into_result()?;

        Ok(rule_id.to_string())
    }

    /// List access rules in the given scope.
    pub async fn list_access_rules(&self, scope: &Scope) -> Result<Vec<AccessRule>, Error> {
        let path = format!("{}{RULES_PATH}", scope.path_prefix());
        self.call(Method::GET, &path).await?.into_list()
    }
}
