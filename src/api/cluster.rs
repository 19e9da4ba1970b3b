use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::{ApiRequest, NodeOverride};
use crate::value::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNode {
    pub id: Option<Value>,
    pub name: String,
    pub url: Option<String>,
    pub ip_address: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>, // "Primary" / "Secondary"
    pub state: Option<String>,     // "Self" / "Connected" / "Unreachable"
    pub last_seen: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterState {
    pub cluster_initialized: bool,
    pub dns_server_domain: Option<String>,
    pub version: Option<String>,
    pub cluster_domain: Option<String>,
    pub heartbeat_refresh_interval_seconds: Option<u32>,
    pub cluster_nodes: Option<Vec<ClusterNode>>,
}

impl ClusterState {
    pub fn nodes(&self) -> &[ClusterNode] {
        self.cluster_nodes.as_deref().unwrap_or(&[])
    }

    /// Node names usable as the `node` request parameter.
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes().iter().map(|n| n.name.as_str()).collect()
    }
}

impl<T: Transport> ApiClient<T> {
    /// Cluster membership as seen by `node`; pass `NodeOverride::Omit` to
    /// ask the server the session is signed in to.
    pub async fn cluster_state(&self, node: NodeOverride) -> Result<ClusterState> {
        self.call(
            ApiRequest::get("admin/cluster/state")
                .param("includeServerIpAddresses", true)
                .node(node),
        )
        .await
    }
}
