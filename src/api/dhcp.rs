use std::collections::BTreeMap;

use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::ApiRequest;
use crate::value::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub scope: String,
    #[serde(rename = "type")]
    pub lease_type: String, // "Dynamic" / "Reserved"
    pub hardware_address: String,
    pub client_identifier: Option<String>,
    pub address: String,
    pub host_name: Option<String>,
    pub lease_obtained: Option<String>,
    pub lease_expires: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSummary {
    pub name: String,
    pub enabled: bool,
    pub starting_address: String,
    pub ending_address: String,
    pub subnet_mask: String,
    pub network_address: Option<String>,
    pub broadcast_address: Option<String>,
    pub interface_address: Option<String>,
}

/// Full scope settings. The long tail of options is kept untyped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub name: String,
    pub starting_address: String,
    pub ending_address: String,
    pub subnet_mask: String,
    pub lease_time_days: Option<u32>,
    pub lease_time_hours: Option<u32>,
    pub lease_time_minutes: Option<u32>,
    pub router_address: Option<String>,
    pub dns_servers: Option<Vec<String>>,
    #[serde(flatten)]
    pub options: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct LeaseList {
    leases: Vec<Lease>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScopeList {
    scopes: Vec<ScopeSummary>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_leases(&self) -> Result<Vec<Lease>> {
        let list: LeaseList = self.call(ApiRequest::get("dhcp/leases/list")).await?;
        Ok(list.leases)
    }

    pub async fn remove_lease(&self, scope: &str, hardware_address: &str) -> Result<()> {
        self.call_ack(
            ApiRequest::get("dhcp/leases/remove")
                .param("name", scope)
                .param("hardwareAddress", hardware_address),
        )
        .await
    }

    pub async fn list_scopes(&self) -> Result<Vec<ScopeSummary>> {
        let list: ScopeList = self.call(ApiRequest::get("dhcp/scopes/list")).await?;
        Ok(list.scopes)
    }

    pub async fn get_scope(&self, name: &str) -> Result<Scope> {
        self.call(ApiRequest::get("dhcp/scopes/get").param("name", name))
            .await
    }

    pub async fn enable_scope(&self, name: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("dhcp/scopes/enable").param("name", name))
            .await
    }

    pub async fn disable_scope(&self, name: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("dhcp/scopes/disable").param("name", name))
            .await
    }

    pub async fn delete_scope(&self, name: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("dhcp/scopes/delete").param("name", name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_keeps_unmodelled_options() {
        let json = r#"{
            "name": "Default", "startingAddress": "192.168.1.1", "endingAddress": "192.168.1.254",
            "subnetMask": "255.255.255.0", "leaseTimeDays": 7, "leaseTimeHours": 0,
            "leaseTimeMinutes": 0, "offerDelayTime": 0, "pingCheckTimeout": 1000,
            "exclusions": [{"startingAddress": "192.168.1.1", "endingAddress": "192.168.1.10"}]
        }"#;
        let raw: serde_json::Value = serde_json::from_str(json).unwrap();
        let scope: Scope = serde_json::from_value(raw).unwrap();
        assert_eq!(scope.lease_time_days, Some(7));
        assert_eq!(scope.options["pingCheckTimeout"].to_display_string(), "1000");
        assert!(scope.options["exclusions"].as_array().is_some());
        assert!(!scope.options.contains_key("name"));
    }
}
