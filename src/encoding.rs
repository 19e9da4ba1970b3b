//! Per-field request encoding policy.
//!
//! The server has a few quirks on the way in: some list fields must arrive as
//! lists of strings even when they hold numbers, object lists must keep their
//! native JSON types, and some fields are known under a different name on the
//! wire than in the typed models. Those quirks live here as a table keyed by
//! the client-side field name, consulted once per outgoing field by the
//! request builder.
use std::collections::HashMap;

use crate::value::Value;

/// How list values of a field are put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayEncoding {
    /// Sent unchanged; numbers stay numbers.
    #[default]
    Native,
    /// Scalar elements are rendered as strings (`[53, 5380]` becomes
    /// `["53", "5380"]`). Object elements are left untouched.
    Strings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRule {
    pub wire_name: Option<String>,
    pub arrays: ArrayEncoding,
}

#[derive(Debug, Clone)]
pub struct EncodingRules {
    fields: HashMap<String, FieldRule>,
}

/// Settings lists the server only accepts as string arrays.
const STRING_ARRAY_FIELDS: &[&str] = &[
    "dnsServerLocalEndPoints",
    "dnsServerIPv4SourceAddresses",
    "dnsServerIPv6SourceAddresses",
    "webServiceLocalAddresses",
    "forwarders",
    "blockListUrls",
    "recursionNetworkACL",
    "zoneTransferAllowedNetworks",
    "notifyAllowedNetworks",
    "reverseProxyNetworkACL",
];

/// Object lists whose numeric members must survive as numbers.
const NATIVE_ARRAY_FIELDS: &[&str] = &["tsigKeys", "qpmPrefixLimitsIPv4", "qpmPrefixLimitsIPv6"];

/// `(client name, wire name)` pairs.
const RENAMED_FIELDS: &[(&str, &str)] = &[("proxyBypassList", "proxyBypass")];

impl Default for EncodingRules {
    fn default() -> Self {
        let mut rules = EncodingRules::empty();
        for name in STRING_ARRAY_FIELDS {
            rules = rules.string_array(*name);
        }
        for name in NATIVE_ARRAY_FIELDS {
            rules = rules.native_array(*name);
        }
        for (from, to) in RENAMED_FIELDS {
            rules = rules.rename(*from, *to).string_array(*from);
        }
        rules
    }
}

impl EncodingRules {
    /// A table with no rules: every field goes out as-is.
    pub fn empty() -> Self {
        EncodingRules {
            fields: HashMap::new(),
        }
    }

    pub fn rule(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(field.into(), rule);
        self
    }

    pub fn rename(mut self, field: impl Into<String>, wire_name: impl Into<String>) -> Self {
        self.fields.entry(field.into()).or_default().wire_name = Some(wire_name.into());
        self
    }

    pub fn string_array(mut self, field: impl Into<String>) -> Self {
        self.fields.entry(field.into()).or_default().arrays = ArrayEncoding::Strings;
        self
    }

    pub fn native_array(mut self, field: impl Into<String>) -> Self {
        self.fields.entry(field.into()).or_default().arrays = ArrayEncoding::Native;
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.fields.get(field)
    }

    /// Apply the rule for `field` and return the wire name and wire value.
    pub fn encode_field(&self, field: &str, value: Value) -> (String, Value) {
        let Some(rule) = self.fields.get(field) else {
            return (field.to_string(), value);
        };

        let name = rule.wire_name.clone().unwrap_or_else(|| field.to_string());
        let value = match (rule.arrays, value) {
            (ArrayEncoding::Strings, Value::Array(items)) => {
                Value::Array(items.into_iter().map(stringify_scalar).collect())
            }
            (_, value) => value,
        };
        (name, value)
    }

    pub fn encode_fields<I>(&self, fields: I) -> Vec<(String, Value)>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        fields
            .into_iter()
            .map(|(name, value)| self.encode_field(&name, value))
            .collect()
    }
}

fn stringify_scalar(v: Value) -> Value {
    match v {
        Value::Bool(_) | Value::Number(_) => Value::String(v.to_display_string()),
        other => other,
    }
}

/// Text form of an encoded value for a query string or form body; `None`
/// means the field is left out.
pub fn query_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_display_string()),
        Value::Array(items) if items.iter().all(Value::is_scalar) => Some(
            items
                .iter()
                .filter(|v| !v.is_null())
                .map(Value::to_display_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(serde_json::Value::from(other.clone()).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn simple_array_numbers_become_strings() {
        let rules = EncodingRules::empty().string_array("listenPorts");
        let (name, value) = rules.encode_field("listenPorts", json("[53, 5380]"));
        assert_eq!(name, "listenPorts");
        assert_eq!(value, json(r#"["53", "5380"]"#));
    }

    #[test]
    fn object_array_keeps_numbers() {
        let keys = json(
            r#"[{"keyName":"xfr","sharedSecret":"c2VjcmV0","algorithmName":"hmac-sha256","fudge":300}]"#,
        );
        let (name, value) = EncodingRules::default().encode_field("tsigKeys", keys.clone());
        assert_eq!(name, "tsigKeys");
        assert_eq!(value, keys);
        let wire = serde_json::to_string(&value).unwrap();
        assert!(wire.contains(r#""fudge":300"#));
    }

    #[test]
    fn string_array_leaves_object_elements_alone() {
        let rules = EncodingRules::empty().string_array("mixed");
        let (_, value) = rules.encode_field("mixed", json(r#"[1, {"n": 2}, true, null]"#));
        assert_eq!(value, json(r#"["1", {"n": 2}, "true", null]"#));
    }

    #[test]
    fn proxy_bypass_list_is_renamed() {
        let bypass = json(r#"["127.0.0.0/8", "localhost"]"#);
        let (name, value) = EncodingRules::default().encode_field("proxyBypassList", bypass.clone());
        assert_eq!(name, "proxyBypass");
        assert_eq!(value, bypass);
    }

    #[test]
    fn any_number_of_renames() {
        let rules = EncodingRules::empty()
            .rename("a", "wireA")
            .rename("b", "wireB");
        let encoded = rules.encode_fields(vec![
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::from(2)),
            ("c".to_string(), Value::from(3)),
        ]);
        let names: Vec<&str> = encoded.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["wireA", "wireB", "c"]);
    }

    #[test]
    fn unlisted_fields_pass_through() {
        let (name, value) = EncodingRules::default().encode_field("ttl", json("[3600]"));
        assert_eq!(name, "ttl");
        assert_eq!(value, json("[3600]"));
    }

    #[test]
    fn query_text_rendering() {
        assert_eq!(query_text(&Value::Null), None);
        assert_eq!(query_text(&Value::from("example.com")).as_deref(), Some("example.com"));
        assert_eq!(query_text(&Value::from(3600)).as_deref(), Some("3600"));
        assert_eq!(query_text(&Value::from(true)).as_deref(), Some("true"));
        assert_eq!(
            query_text(&json(r#"["8.8.8.8", "1.1.1.1"]"#)).as_deref(),
            Some("8.8.8.8,1.1.1.1")
        );
        assert_eq!(
            query_text(&json(r#"[{"a":1}]"#)).as_deref(),
            Some(r#"[{"a":1}]"#)
        );
    }
}
