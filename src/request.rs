//! Typed description of one API call before encoding.
use serde::Serialize;

use crate::error::{Error, Result};
use crate::value::Value;

/// Ordered field list. Order is kept so query strings are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, Value)>);

impl Params {
    pub fn new() -> Self {
        Params(Vec::new())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_opt<V: Into<Value>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    /// Set a field, replacing an earlier value of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Flatten a serializable struct into top-level fields. Field names are
    /// whatever the struct serializes to, so rule lookups see those names.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        match serde_json::to_value(value).map_err(|e| Error::Encode(e.to_string()))? {
            serde_json::Value::Object(map) => Ok(Params(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
            other => Err(Error::Encode(format!(
                "expected an object to flatten into fields, got {other}"
            ))),
        }
    }

    pub fn extend(&mut self, other: Params) {
        for (name, value) in other.0 {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStyle {
    /// GET, fields in the query string.
    Get,
    /// POST, fields form-encoded in the body.
    PostForm,
    /// POST, fields in the query string and a JSON object body.
    PostJson,
}

/// Per-request handling of the cluster `node` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeOverride {
    /// Use the node selector's current choice.
    #[default]
    Inherit,
    /// Address this node regardless of the selector.
    Node(String),
    /// Send no `node` parameter.
    Omit,
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub endpoint: String,
    pub style: RequestStyle,
    pub params: Params,
    pub body: Option<Params>,
    pub node: NodeOverride,
    /// Send without a session token (sign-in).
    pub anonymous: bool,
}

impl ApiRequest {
    fn new(endpoint: impl Into<String>, style: RequestStyle) -> Self {
        ApiRequest {
            endpoint: endpoint.into(),
            style,
            params: Params::new(),
            body: None,
            node: NodeOverride::Inherit,
            anonymous: false,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, RequestStyle::Get)
    }

    pub fn post_form(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, RequestStyle::PostForm)
    }

    pub fn post_json(endpoint: impl Into<String>, body: Params) -> Self {
        let mut req = Self::new(endpoint, RequestStyle::PostJson);
        req.body = Some(body);
        req
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name, value);
        self
    }

    pub fn param_opt<V: Into<Value>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.params = self.params.with_opt(name, value);
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    pub fn node(mut self, node: NodeOverride) -> Self {
        self.node = node;
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        zone: String,
        ttl: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        comments: Option<String>,
    }

    #[test]
    fn from_serialize_flattens_struct_fields() {
        let params = Params::from_serialize(&Sample {
            zone: "example.com".into(),
            ttl: 3600,
            comments: None,
        })
        .unwrap();
        assert_eq!(params.get("zone"), Some(&Value::from("example.com")));
        assert_eq!(params.get("ttl"), Some(&Value::from(3600)));
        assert!(params.get("comments").is_none());
    }

    #[test]
    fn from_serialize_rejects_non_objects() {
        assert!(matches!(
            Params::from_serialize(&vec![1, 2]),
            Err(Error::Encode(_))
        ));
    }

    #[test]
    fn insert_replaces_in_place() {
        let params = Params::new().with("a", 1).with("b", 2).with("a", 3);
        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(params.get("a"), Some(&Value::from(3)));
    }
}
