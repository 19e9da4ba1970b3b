//! Typed client for a DNS server's administrative HTTP API.
//!
//! Every call goes through [`ApiClient`], which encodes fields with the
//! [`EncodingRules`] table, attaches the session token and selected cluster
//! node from injected readers, and decodes the server's response envelope
//! into a payload or a typed [`Error`].

pub mod api;
pub mod client;
pub mod config;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod http;
pub mod permissions;
pub mod request;
pub mod session;
pub mod value;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use encoding::{ArrayEncoding, EncodingRules, FieldRule};
pub use envelope::{Envelope, Status};
pub use error::{Error, Result, TransportError, TransportErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport};
pub use permissions::{Permission, PermissionLayout, format_permissions, parse_permissions};
pub use request::{ApiRequest, NodeOverride, Params, RequestStyle};
pub use session::{NodeSelector, TokenProvider};
pub use value::Value;
