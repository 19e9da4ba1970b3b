use std::time::Duration;

use crate::encoding::EncodingRules;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("dns-admin-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String, // e.g. "http://192.0.2.10:5380"
    pub timeout: Duration,
    pub user_agent: String,
    pub rules: EncodingRules,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rules: EncodingRules::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rules(mut self, rules: EncodingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Server root without trailing slash.
    pub fn base_url_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL for an endpoint path such as `zones/list` or `/api/zones/list`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let path = endpoint.trim_start_matches('/');
        let path = path.strip_prefix("api/").unwrap_or(path);
        format!("{}/api/{}", self.base_url_root(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_normalizes_slashes_and_prefix() {
        let config = ClientConfig::new("http://dns.example:5380/");
        assert_eq!(
            config.endpoint_url("zones/list"),
            "http://dns.example:5380/api/zones/list"
        );
        assert_eq!(
            config.endpoint_url("/api/zones/list"),
            "http://dns.example:5380/api/zones/list"
        );
    }
}
