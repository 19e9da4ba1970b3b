use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::admin::SectionPermissions;
use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::permissions::{Permission, PermissionLayout, format_permissions};
use crate::request::{ApiRequest, Params};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ZoneType {
    Primary,
    Secondary,
    Stub,
    Forwarder,
    SecondaryForwarder,
    Catalog,
    SecondaryCatalog,
    #[serde(other)]
    Unknown,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Primary => "Primary",
            ZoneType::Secondary => "Secondary",
            ZoneType::Stub => "Stub",
            ZoneType::Forwarder => "Forwarder",
            ZoneType::SecondaryForwarder => "SecondaryForwarder",
            ZoneType::Catalog => "Catalog",
            ZoneType::SecondaryCatalog => "SecondaryCatalog",
            ZoneType::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    pub internal: Option<bool>,
    pub dnssec_status: Option<String>,
    pub soa_serial: Option<u32>,
    pub expiry: Option<DateTime<Utc>>,
    pub is_expired: Option<bool>,
    pub sync_failed: Option<bool>,
    pub last_modified: Option<DateTime<Utc>>,
    pub disabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneList {
    pub page_number: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_zones: Option<u32>,
    pub zones: Vec<ZoneInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedZone {
    pub domain: String,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_zones(&self, page: Option<u32>, per_page: Option<u32>) -> Result<ZoneList> {
        self.call(
            ApiRequest::get("zones/list")
                .param_opt("pageNumber", page)
                .param_opt("zonesPerPage", per_page),
        )
        .await
    }

    /// Create a zone. `options` carries type-specific fields such as
    /// `primaryNameServerAddresses` or `forwarder`.
    pub async fn create_zone(&self, zone: &str, zone_type: ZoneType, options: Params) -> Result<CreatedZone> {
        self.call(
            ApiRequest::get("zones/create")
                .param("zone", zone)
                .param("type", zone_type.as_str())
                .params(options),
        )
        .await
    }

    pub async fn delete_zone(&self, zone: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("zones/delete").param("zone", zone))
            .await
    }

    pub async fn enable_zone(&self, zone: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("zones/enable").param("zone", zone))
            .await
    }

    pub async fn disable_zone(&self, zone: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("zones/disable").param("zone", zone))
            .await
    }

    pub async fn zone_permissions(&self, zone: &str) -> Result<SectionPermissions> {
        self.call(
            ApiRequest::get("zones/permissions/get")
                .param("zone", zone)
                .param("includeUsersAndGroups", true),
        )
        .await
    }

    pub async fn set_zone_permissions(
        &self,
        zone: &str,
        users: &[Permission],
        groups: &[Permission],
    ) -> Result<()> {
        self.call_ack(
            ApiRequest::post_form("zones/permissions/set")
                .param("zone", zone)
                .param("userPermissions", format_permissions(users, PermissionLayout::Standard)?)
                .param("groupPermissions", format_permissions(groups, PermissionLayout::Standard)?),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_list_decodes_server_shape() {
        let json = r#"{
            "pageNumber": 1, "totalPages": 1, "totalZones": 2,
            "zones": [
                {"name":"example.com","type":"Primary","internal":false,"dnssecStatus":"Unsigned",
                 "soaSerial":2024052801,"lastModified":"2024-05-28T10:04:13.000Z","disabled":false},
                {"name":"0.in-addr.arpa","type":"Primary","internal":true,"dnssecStatus":"Unsigned",
                 "soaSerial":1,"disabled":false},
                {"name":"odd.example","type":"SomethingNew","disabled":true}
            ]
        }"#;
        let list: ZoneList = serde_json::from_str(json).unwrap();
        assert_eq!(list.zones.len(), 3);
        assert_eq!(list.zones[0].zone_type, ZoneType::Primary);
        assert_eq!(list.zones[0].soa_serial, Some(2024052801));
        assert!(list.zones[0].last_modified.is_some());
        assert_eq!(list.zones[2].zone_type, ZoneType::Unknown);
    }

    #[test]
    fn zone_without_disabled_flag_is_rejected() {
        let json = r#"{"zones":[{"name":"example.com","type":"Primary"}]}"#;
        assert!(serde_json::from_str::<ZoneList>(json).is_err());
    }
}
