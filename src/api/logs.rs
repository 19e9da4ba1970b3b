//! Server log files and app query logs.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::{ApiRequest, Params};
use crate::value::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFile {
    pub file_name: String,
    pub size: Value, // "12.5 KB"
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogFileList {
    log_files: Vec<LogFile>,
}

/// Filter for an app's query log. `name` and `class_path` identify the
/// logging app.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLogFilter {
    pub name: String,
    pub class_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending_order: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qtype: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLogEntry {
    pub row_number: u64,
    pub timestamp: DateTime<Utc>,
    pub client_ip_address: String,
    pub protocol: String,
    pub response_type: String,
    pub response_rtt: Option<f64>,
    pub rcode: String,
    pub qname: Option<String>,
    pub qtype: Option<String>,
    pub qclass: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLogPage {
    pub page_number: u32,
    pub total_pages: u32,
    pub total_entries: u64,
    pub entries: Vec<QueryLogEntry>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_logs(&self) -> Result<Vec<LogFile>> {
        let list: LogFileList = self.call(ApiRequest::get("logs/list")).await?;
        Ok(list.log_files)
    }

    /// Full text of one log file.
    pub async fn download_log(&self, file_name: &str) -> Result<String> {
        self.call_text(ApiRequest::get("logs/download").param("fileName", file_name))
            .await
    }

    pub async fn delete_log(&self, file_name: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("logs/delete").param("log", file_name))
            .await
    }

    pub async fn delete_all_logs(&self) -> Result<()> {
        self.call_ack(ApiRequest::get("logs/deleteAll")).await
    }

    pub async fn query_logs(&self, filter: &QueryLogFilter) -> Result<QueryLogPage> {
        self.call(ApiRequest::get("logs/query").params(Params::from_serialize(filter)?))
            .await
    }
}
