use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::ApiRequest;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPeriod {
    LastHour,
    LastDay,
    LastWeek,
    LastMonth,
    LastYear,
}

impl StatsPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            StatsPeriod::LastHour => "LastHour",
            StatsPeriod::LastDay => "LastDay",
            StatsPeriod::LastWeek => "LastWeek",
            StatsPeriod::LastMonth => "LastMonth",
            StatsPeriod::LastYear => "LastYear",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCounters {
    pub total_queries: u64,
    pub total_no_error: u64,
    pub total_server_failure: u64,
    pub total_nx_domain: u64,
    pub total_refused: u64,
    pub total_authoritative: u64,
    pub total_recursive: u64,
    pub total_cached: u64,
    pub total_blocked: u64,
    pub total_dropped: Option<u64>,
    pub total_clients: u64,
    pub zones: Option<u64>,
    pub cached_entries: Option<u64>,
    pub allowed_zones: Option<u64>,
    pub blocked_zones: Option<u64>,
    pub allow_list_zones: Option<u64>,
    pub block_list_zones: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEntry {
    pub name: String,
    pub hits: u64,
    pub domain: Option<String>,
    pub rate_limited: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub stats: QueryCounters,
    /// Chart.js series, passed through untouched.
    pub main_chart_data: Option<Value>,
    pub top_clients: Vec<TopEntry>,
    pub top_domains: Vec<TopEntry>,
    pub top_blocked_domains: Vec<TopEntry>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn dashboard_stats(&self, period: StatsPeriod) -> Result<DashboardStats> {
        self.call(
            ApiRequest::get("dashboard/stats/get")
                .param("type", period.as_str())
                .param("utc", true),
        )
        .await
    }
}
