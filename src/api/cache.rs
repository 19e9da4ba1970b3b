use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::ApiRequest;
use crate::value::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct CacheZone {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    /// Remaining TTL; some versions send a number, others a display string.
    pub ttl: Value,
    #[serde(rename = "rData")]
    pub r_data: Value,
    pub dnssec_status: Option<String>,
}

/// One level of the cache tree: child labels under `domain` plus the
/// records cached at `domain` itself.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheListing {
    pub domain: String,
    pub zones: Vec<CacheZone>,
    pub records: Vec<CachedRecord>,
}

impl<T: Transport> ApiClient<T> {
    /// Browse the cache; `None` lists the root.
    pub async fn list_cache(&self, domain: Option<&str>) -> Result<CacheListing> {
        self.call(ApiRequest::get("cache/list").param_opt("domain", domain))
            .await
    }

    pub async fn delete_cached(&self, domain: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("cache/delete").param("domain", domain))
            .await
    }

    pub async fn flush_cache(&self) -> Result<()> {
        self.call_ack(ApiRequest::get("cache/flush")).await
    }
}
