//! Ask the server to resolve a query and show the raw answer.
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::ApiRequest;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryProtocol {
    Udp,
    Tcp,
    Tls,
    Https,
    Quic,
}

impl QueryProtocol {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryProtocol::Udp => "Udp",
            QueryProtocol::Tcp => "Tcp",
            QueryProtocol::Tls => "Tls",
            QueryProtocol::Https => "Https",
            QueryProtocol::Quic => "Quic",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolveQuery {
    /// Upstream to ask, or `this-server` / `recursive-resolver`.
    pub server: String,
    pub domain: String,
    pub record_type: String,
    pub protocol: QueryProtocol,
    pub dnssec: bool,
    pub edns_client_subnet: Option<String>,
}

impl ResolveQuery {
    pub fn new(domain: impl Into<String>, record_type: impl Into<String>) -> Self {
        ResolveQuery {
            server: "this-server".to_string(),
            domain: domain.into(),
            record_type: record_type.into(),
            protocol: QueryProtocol::Udp,
            dnssec: false,
            edns_client_subnet: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    /// The DNS message as the server renders it.
    pub result: Value,
    pub raw_responses: Option<Value>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn resolve(&self, query: &ResolveQuery) -> Result<ResolveResult> {
        self.call(
            ApiRequest::get("dnsClient/resolve")
                .param("server", query.server.as_str())
                .param("domain", query.domain.as_str())
                .param("type", query.record_type.as_str())
                .param("protocol", query.protocol.as_str())
                .param("dnssec", query.dnssec)
                .param_opt("eDnsClientSubnet", query.edns_client_subnet.as_deref()),
        )
        .await
    }
}
