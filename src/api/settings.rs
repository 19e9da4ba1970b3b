//! Server settings. Reads decode a typed core plus an untyped remainder;
//! writes go out as a JSON body through the request encoding rules, so list
//! and rename quirks are handled in one place.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::{ApiRequest, Params};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsigKey {
    pub key_name: String,
    pub shared_secret: String,
    pub algorithm_name: String,
    /// Fields added by newer servers, echoed back unchanged.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxySettings {
    #[serde(rename = "type")]
    pub proxy_type: String, // "Http" / "Socks5"
    pub address: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bypass: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsSettings {
    pub version: String,
    pub dns_server_domain: String,
    pub dns_server_local_end_points: Vec<String>,
    pub web_service_local_addresses: Option<Vec<String>>,
    pub web_service_http_port: Option<u16>,
    pub enable_blocking: Option<bool>,
    pub block_list_urls: Option<Vec<String>>,
    pub forwarders: Option<Vec<String>>,
    pub forwarder_protocol: Option<String>,
    pub proxy: Option<ProxySettings>,
    pub tsig_keys: Option<Vec<TsigKey>>,
    /// Everything not modelled above.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Partial settings write; unset fields are left alone by the server.
/// Field names here are client-side names; the encoding rules map them to
/// wire names and list encodings.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_server_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_server_local_end_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_service_local_addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_blocking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_list_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarders: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarder_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_bypass_list: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsig_keys: Option<Vec<TsigKey>>,
    /// Any other settings field, by client-side name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockingPause {
    temporary_disable_blocking_till: DateTime<Utc>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_settings(&self) -> Result<DnsSettings> {
        self.call(ApiRequest::get("settings/get")).await
    }

    /// Apply `update` and return the settings as the server now has them.
    pub async fn set_settings(&self, update: &SettingsUpdate) -> Result<DnsSettings> {
        let body = Params::from_serialize(update)?;
        self.call(ApiRequest::post_json("settings/set", body)).await
    }

    pub async fn force_update_block_lists(&self) -> Result<()> {
        self.call_ack(ApiRequest::get("settings/forceUpdateBlockLists"))
            .await
    }

    /// Pause blocking; returns when it resumes.
    pub async fn pause_blocking(&self, minutes: u32) -> Result<DateTime<Utc>> {
        let pause: BlockingPause = self
            .call(ApiRequest::get("settings/temporaryDisableBlocking").param("minutes", minutes))
            .await?;
        Ok(pause.temporary_disable_blocking_till)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_keep_unmodelled_fields() {
        let json = r#"{
            "version": "13.2", "dnsServerDomain": "dns.example",
            "dnsServerLocalEndPoints": ["0.0.0.0:53", "[::]:53"],
            "cacheMaximumEntries": 10000, "serveStaleTtl": 259200,
            "statsCounter": 18446744073709551616, "weight": 1e400,
            "proxy": {"type": "Http", "address": "proxy.local", "port": 8080, "bypass": ["localhost"]},
            "tsigKeys": [{"keyName": "xfr", "sharedSecret": "c2VjcmV0", "algorithmName": "hmac-sha256"}]
        }"#;
        let body = format!(r#"{{"status":"ok","response":{json}}}"#);
        let settings: DnsSettings = crate::envelope::decode_payload(body.as_bytes()).unwrap();
        assert_eq!(settings.dns_server_local_end_points.len(), 2);
        assert_eq!(settings.other["cacheMaximumEntries"].as_i64(), Some(10000));
        assert_eq!(settings.other["statsCounter"].to_display_string(), "18446744073709551616");
        assert_eq!(settings.other["weight"].to_display_string(), "1e400");
        assert_eq!(settings.proxy.unwrap().bypass.unwrap(), vec!["localhost".to_string()]);
        assert_eq!(settings.tsig_keys.unwrap()[0].key_name, "xfr");
    }

    #[test]
    fn update_serializes_client_side_names() {
        let update = SettingsUpdate {
            proxy_bypass_list: Some(vec!["localhost".into()]),
            ..Default::default()
        };
        let params = Params::from_serialize(&update).unwrap();
        assert!(params.get("proxyBypassList").is_some());
        assert!(params.get("forwarders").is_none());
    }
}
