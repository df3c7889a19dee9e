//! Typed views over the JSON list bodies returned by the Kubernetes API.
//!
//! Only the fields the `list` command reads are modelled. Unknown fields are
//! ignored, and a missing or `null` field falls back to its empty value.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{Error, Result};

/// Label carrying the name of the kubeware group a resource belongs to.
pub const KUBEWARE_LABEL: &str = "kubeware";

/// Body of a `ServiceList`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: ServiceSpec,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ServiceStatus,
}

impl ServiceItem {
    /// Hostname of the first load balancer ingress, if any ingress exists.
    pub fn external_hostname(&self) -> Option<&str> {
        self.status
            .load_balancer
            .ingress
            .first()
            .map(|ingress| ingress.hostname.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Kept verbatim, never parsed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub creation_timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
}

impl Metadata {
    /// Value of the `kubeware` label, if set.
    pub fn kubeware(&self) -> Option<&str> {
        self.labels.get(KUBEWARE_LABEL).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceSpec {
    #[serde(rename = "clusterIP", default, deserialize_with = "null_as_default")]
    pub cluster_ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub load_balancer: LoadBalancerStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoadBalancerStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingress: Vec<LoadBalancerIngress>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoadBalancerIngress {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
}

/// Body of any list whose items only need metadata, such as a
/// `ReplicationControllerList`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ResourceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a `ServiceList` JSON body.
pub fn decode_services(json: &str) -> Result<ServiceList> {
    let list: ServiceList =
        serde_json::from_str(json).map_err(|source| Error::decode("services", source))?;
    debug!(count = list.items.len(), "decoded services");
    Ok(list)
}

/// Decode a `ReplicationControllerList` JSON body.
pub fn decode_controllers(json: &str) -> Result<ResourceList> {
    let list: ResourceList =
        serde_json::from_str(json).map_err(|source| Error::decode("controllers", source))?;
    debug!(count = list.items.len(), "decoded controllers");
    Ok(list)
}
