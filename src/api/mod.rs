//! Typed endpoint groups. Each module holds the wire models for one area of
//! the API and the `ApiClient` methods that call it.
pub mod admin;
pub mod apps;
pub mod cache;
pub mod cluster;
pub mod dashboard;
pub mod dhcp;
pub mod dns_client;
pub mod logs;
pub mod records;
pub mod settings;
pub mod user;
pub mod zones;

