//! Resource records of a zone. Record data (`rData`) differs per record
//! type and is kept as a dynamic [`Value`].
use serde::Deserialize;

use crate::api::zones::ZoneInfo;
use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::{ApiRequest, Params};
use crate::value::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String, // "A", "MX", "SVCB", ...
    pub ttl: u32,
    pub disabled: bool,
    #[serde(rename = "rData")]
    pub r_data: Value,
    pub dnssec_status: Option<String>,
    pub last_used_on: Option<String>,
    pub comments: Option<String>,
    pub expiry_ttl: Option<u32>,
}

impl Record {
    pub fn rdata_field(&self, name: &str) -> Option<&Value> {
        self.r_data.get(name)
    }

    /// `key: value` pairs of the record data, for display.
    pub fn rdata_summary(&self) -> String {
        match self.r_data.as_object() {
            Some(map) => map
                .iter()
                .map(|(k, v)| format!("{k}: {}", v.to_display_string()))
                .collect::<Vec<_>>()
                .join(", "),
            None => self.r_data.to_display_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRecords {
    pub zone: ZoneInfo,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddedRecord {
    added_record: Record,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedRecord {
    updated_record: Record,
}

/// A record to add. `data` carries the type-specific fields the server
/// expects, e.g. `ipAddress` for A or `exchange`/`preference` for MX.
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub domain: String,
    pub zone: Option<String>,
    pub record_type: String,
    pub ttl: Option<u32>,
    pub overwrite: Option<bool>,
    pub comments: Option<String>,
    pub data: Params,
}

/// Changes to an existing record. `data` identifies the current value and
/// carries the new one (`ipAddress` + `newIpAddress`, ...).
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub domain: String,
    pub zone: Option<String>,
    pub record_type: String,
    pub new_domain: Option<String>,
    pub ttl: Option<u32>,
    pub disable: Option<bool>,
    pub comments: Option<String>,
    pub data: Params,
}

impl<T: Transport> ApiClient<T> {
    /// Records at `domain`, or the whole zone when `list_zone` is set.
    pub async fn get_records(&self, domain: &str, zone: Option<&str>, list_zone: bool) -> Result<ZoneRecords> {
        self.call(
            ApiRequest::get("zones/records/get")
                .param("domain", domain)
                .param_opt("zone", zone)
                .param("listZone", list_zone),
        )
        .await
    }

    pub async fn add_record(&self, record: NewRecord) -> Result<Record> {
        let added: AddedRecord = self
            .call(
                ApiRequest::get("zones/records/add")
                    .param("domain", record.domain)
                    .param_opt("zone", record.zone)
                    .param("type", record.record_type)
                    .param_opt("ttl", record.ttl)
                    .param_opt("overwrite", record.overwrite)
                    .param_opt("comments", record.comments)
                    .params(record.data),
            )
            .await?;
        Ok(added.added_record)
    }

    pub async fn update_record(&self, update: RecordUpdate) -> Result<Record> {
        let updated: UpdatedRecord = self
            .call(
                ApiRequest::get("zones/records/update")
                    .param("domain", update.domain)
                    .param_opt("zone", update.zone)
                    .param("type", update.record_type)
                    .param_opt("newDomain", update.new_domain)
                    .param_opt("ttl", update.ttl)
                    .param_opt("disable", update.disable)
                    .param_opt("comments", update.comments)
                    .params(update.data),
            )
            .await?;
        Ok(updated.updated_record)
    }

    /// Delete the record at `domain` of `record_type` whose data matches `data`.
    pub async fn delete_record(
        &self,
        domain: &str,
        zone: Option<&str>,
        record_type: &str,
        data: Params,
    ) -> Result<()> {
        self.call_ack(
            ApiRequest::get("zones/records/delete")
                .param("domain", domain)
                .param_opt("zone", zone)
                .param("type", record_type)
                .params(data),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_data_keeps_types() {
        let json = r#"{
            "disabled": false, "name": "example.com", "type": "MX", "ttl": 3600,
            "rData": {"preference": 10, "exchange": "mail.example.com"},
            "dnssecStatus": "Unknown", "lastUsedOn": "0001-01-01T00:00:00"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.rdata_field("preference"), Some(&Value::from(10)));
        assert_eq!(record.rdata_summary(), "exchange: mail.example.com, preference: 10");
    }
}
