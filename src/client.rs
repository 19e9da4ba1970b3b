//! The single choke point between typed calls and the server's HTTP API.
//!
//! `ApiClient` holds configuration and read-only handles to the session and
//! cluster state; it keeps nothing between calls, so clones can be used from
//! any number of tasks at once. Endpoint groups in [`crate::api`] are thin
//! typed wrappers over [`ApiClient::call`] and friends.
use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::encoding::query_text;
use crate::envelope;
use crate::error::{Error, Result, TransportError, TransportErrorKind};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport};
use crate::request::{ApiRequest, NodeOverride, Params, RequestStyle};
use crate::session::{NodeSelector, TokenProvider};
use crate::value::Value;

const TOKEN_PARAM: &str = "token";
const NODE_PARAM: &str = "node";

#[derive(Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    config: Arc<ClientConfig>,
    transport: T,
    tokens: Arc<dyn TokenProvider>,
    nodes: Arc<dyn NodeSelector>,
}

impl ApiClient<ReqwestTransport> {
    /// Client over `reqwest` using the configured timeout.
    pub fn connect(
        config: ClientConfig,
        tokens: impl TokenProvider + 'static,
        nodes: impl NodeSelector + 'static,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout, &config.user_agent)?;
        Ok(Self::new(config, transport, tokens, nodes))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(
        config: ClientConfig,
        transport: T,
        tokens: impl TokenProvider + 'static,
        nodes: impl NodeSelector + 'static,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            tokens: Arc::new(tokens),
            nodes: Arc::new(nodes),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Encode `req` into a concrete HTTP request. No I/O.
    pub fn build_request(&self, req: &ApiRequest) -> Result<HttpRequest> {
        let rules = &self.config.rules;

        let mut query: Vec<(String, String)> = Vec::new();
        let mut form: Vec<(String, String)> = Vec::new();

        for (name, value) in rules.encode_fields(req.params.clone()) {
            // `token` and `node` only ever come from the session and node selector.
            if name == TOKEN_PARAM || name == NODE_PARAM {
                continue;
            }
            let Some(text) = query_text(&value) else {
                continue;
            };
            match req.style {
                RequestStyle::PostForm => form.push((name, text)),
                RequestStyle::Get | RequestStyle::PostJson => query.push((name, text)),
            }
        }

        if !req.anonymous {
            let token = self.tokens.token().ok_or(Error::Unauthenticated)?;
            query.push((TOKEN_PARAM.to_string(), token));
        }

        let node = match &req.node {
            NodeOverride::Inherit => self.nodes.selected_node(),
            NodeOverride::Node(node) => Some(node.clone()),
            NodeOverride::Omit => None,
        };
        if let Some(node) = node {
            query.push((NODE_PARAM.to_string(), node));
        }

        let mut url = Url::parse(&self.config.endpoint_url(&req.endpoint))
            .map_err(|e| Error::Encode(format!("invalid endpoint URL: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        let (method, headers, body) = match req.style {
            RequestStyle::Get => (HttpMethod::Get, Vec::new(), None),
            RequestStyle::PostForm => (HttpMethod::Post, Vec::new(), Some(RequestBody::Form(form))),
            RequestStyle::PostJson => {
                let fields = req.body.clone().unwrap_or_default();
                let object: serde_json::Map<String, serde_json::Value> = rules
                    .encode_fields(fields)
                    .into_iter()
                    .map(|(name, value)| (name, serde_json::Value::from(value)))
                    .collect();
                let body = serde_json::to_string(&object).map_err(|e| Error::Encode(e.to_string()))?;
                (
                    HttpMethod::Post,
                    vec![("Content-Type".to_string(), "application/json".to_string())],
                    Some(RequestBody::Json(body)),
                )
            }
        };

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    async fn execute(&self, req: &ApiRequest) -> Result<HttpResponse> {
        let http_req = self.build_request(req)?;
        debug!(
            endpoint = %req.endpoint,
            method = ?http_req.method,
            node = ?http_req_node(&http_req),
            "calling API"
        );
        let res = self.transport.send(http_req).await?;
        if !res.is_success() && !envelope::is_envelope(&res.body) {
            warn!(endpoint = %req.endpoint, status = res.status, "non-API response");
            return Err(TransportError::new(
                TransportErrorKind::Status(res.status),
                String::from_utf8_lossy(&res.body).into_owned(),
            )
            .into());
        }
        Ok(res)
    }

    /// Call an endpoint and decode its `response` payload as `R`.
    pub async fn call<R: DeserializeOwned>(&self, req: ApiRequest) -> Result<R> {
        let res = self.execute(&req).await?;
        log_outcome(&req, envelope::decode_payload(&res.body))
    }

    /// Call an endpoint that returns no payload.
    pub async fn call_ack(&self, req: ApiRequest) -> Result<()> {
        let res = self.execute(&req).await?;
        log_outcome(&req, envelope::decode_ack(&res.body))
    }

    /// Call an endpoint whose payload sits beside `status`.
    pub async fn call_flat<R: DeserializeOwned>(&self, req: ApiRequest) -> Result<R> {
        let res = self.execute(&req).await?;
        log_outcome(&req, envelope::decode_flat(&res.body))
    }

    /// Call an endpoint that returns a plain text document on success.
    pub async fn call_text(&self, req: ApiRequest) -> Result<String> {
        let res = self.execute(&req).await?;
        log_outcome(&req, envelope::decode_text(&res.body))
    }

    /// Untyped call, for endpoints without a model here.
    pub async fn call_value(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.call(ApiRequest::get(endpoint).params(params)).await
    }
}

fn http_req_node(req: &HttpRequest) -> Option<String> {
    Url::parse(&req.url).ok().and_then(|url| {
        url.query_pairs()
            .find(|(k, _)| k == NODE_PARAM)
            .map(|(_, v)| v.into_owned())
    })
}

fn log_outcome<R>(req: &ApiRequest, result: Result<R>) -> Result<R> {
    match &result {
        Err(Error::InvalidToken) => warn!(endpoint = %req.endpoint, "session token rejected"),
        Err(Error::Api { message, .. }) => {
            warn!(endpoint = %req.endpoint, error = %message, "API call failed")
        }
        Err(Error::Decode(msg)) => warn!(endpoint = %req.endpoint, error = %msg, "undecodable response"),
        _ => {}
    }
    result
}
