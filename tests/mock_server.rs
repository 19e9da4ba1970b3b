//! Exercise the reqwest transport against a small axum server that speaks
//! the API's envelope conventions, started on an ephemeral port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use dns_admin_client::{
    ApiClient, ClientConfig, Error, NodeOverride, Permission, TransportErrorKind,
    api::settings::SettingsUpdate,
    session::{Anonymous, FixedNode, StaticToken},
};
use serde_json::{Value as JsonValue, json};

const TOKEN: &str = "3c1f0e9d2b7a";

fn token_ok(q: &HashMap<String, String>) -> bool {
    q.get("token").map(String::as_str) == Some(TOKEN)
}

fn invalid_token() -> Json<JsonValue> {
    Json(json!({"status": "invalid-token", "errorMessage": "Invalid token or session expired."}))
}

async fn login(Query(q): Query<HashMap<String, String>>) -> Json<JsonValue> {
    if q.get("user").map(String::as_str) == Some("admin") && q.get("pass").map(String::as_str) == Some("admin") {
        Json(json!({"displayName": "Administrator", "username": "admin", "token": TOKEN, "status": "ok"}))
    } else {
        Json(json!({"status": "error", "errorMessage": "Invalid username or password: admin"}))
    }
}

async fn zones_list(Query(q): Query<HashMap<String, String>>) -> Json<JsonValue> {
    if !token_ok(&q) {
        return invalid_token();
    }
    let node = q.get("node").cloned().unwrap_or_else(|| "local".into());
    Json(json!({
        "status": "ok",
        "response": {
            "pageNumber": 1, "totalPages": 1, "totalZones": 1,
            "zones": [{"name": format!("{node}.example"), "type": "Primary", "disabled": false}]
        }
    }))
}

async fn settings_set(
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
    Json(body): Json<JsonValue>,
) -> Json<JsonValue> {
    if !token_ok(&q) {
        return invalid_token();
    }
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    Json(json!({
        "status": "ok",
        "response": {
            "version": "13.2",
            "dnsServerDomain": "dns.example",
            "dnsServerLocalEndPoints": ["0.0.0.0:53"],
            "echo": body
        }
    }))
}

async fn settings_broken() -> (StatusCode, &'static str) {
    (StatusCode::OK, "<!DOCTYPE html><p>maintenance</p>")
}

async fn permissions_set(
    Query(q): Query<HashMap<String, String>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<JsonValue> {
    if !token_ok(&q) {
        return invalid_token();
    }
    let users = form.get("userPermissions").cloned().unwrap_or_default();
    if users == "admin|true|true|true|viewer|true|false|false" {
        Json(json!({"status": "ok"}))
    } else {
        Json(json!({"status": "error", "errorMessage": format!("unexpected permissions: {users}")}))
    }
}

async fn slow() -> Json<JsonValue> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"status": "ok"}))
}

async fn log_download(Query(q): Query<HashMap<String, String>>) -> String {
    format!("log file {}\nline 2\n", q.get("fileName").cloned().unwrap_or_default())
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/user/login", get(login))
        .route("/api/zones/list", get(zones_list))
        .route("/api/settings/set", post(settings_set))
        .route("/api/settings/get", get(settings_broken))
        .route("/api/zones/permissions/set", post(permissions_set))
        .route("/api/cache/flush", get(slow))
        .route("/api/logs/download", get(log_download));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

fn signed_in(addr: SocketAddr, node: Option<&str>) -> ApiClient {
    ApiClient::connect(
        ClientConfig::new(format!("http://{addr}")),
        StaticToken(TOKEN.into()),
        FixedNode(node.map(String::from)),
    )
    .unwrap()
}

#[tokio::test]
async fn login_then_list_zones() {
    let addr = spawn_server().await;
    let anon = ApiClient::connect(ClientConfig::new(format!("http://{addr}")), Anonymous, Anonymous).unwrap();

    let err = anon.login("admin", "wrong").await.unwrap_err();
    assert!(matches!(err, Error::Api { ref message, .. } if message.starts_with("Invalid username")));

    let login = anon.login("admin", "admin").await.unwrap();
    assert_eq!(login.token, TOKEN);

    let zones = signed_in(addr, None).list_zones(None, None).await.unwrap();
    assert_eq!(zones.zones[0].name, "local.example");
}

#[tokio::test]
async fn selected_node_reaches_server() {
    let addr = spawn_server().await;
    let zones = signed_in(addr, Some("node2")).list_zones(None, None).await.unwrap();
    assert_eq!(zones.zones[0].name, "node2.example");
}

#[tokio::test]
async fn stale_token_is_reported_as_invalid_token() {
    let addr = spawn_server().await;
    let client = ApiClient::connect(
        ClientConfig::new(format!("http://{addr}")),
        StaticToken("expired".into()),
        Anonymous,
    )
    .unwrap();
    assert!(client.list_zones(None, None).await.unwrap_err().is_invalid_token());
}

#[tokio::test]
async fn settings_set_sends_json_with_wire_names() {
    let addr = spawn_server().await;
    let update = SettingsUpdate {
        proxy_bypass_list: Some(vec!["localhost".into()]),
        dns_server_local_end_points: Some(vec!["0.0.0.0:53".into(), "[::]:53".into()]),
        ..Default::default()
    };
    let settings = signed_in(addr, None).set_settings(&update).await.unwrap();
    let echo = settings.other["echo"].as_object().unwrap();
    assert!(echo.contains_key("proxyBypass"));
    assert!(!echo.contains_key("proxyBypassList"));
    assert_eq!(echo["dnsServerLocalEndPoints"].to_display_string(), "0.0.0.0:53, [::]:53");
}

#[tokio::test]
async fn html_from_settings_endpoint_is_decode_error() {
    let addr = spawn_server().await;
    let err = signed_in(addr, None).get_settings().await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn zone_permissions_go_out_as_permission_string() {
    let addr = spawn_server().await;
    signed_in(addr, Some("node2"))
        .set_zone_permissions(
            "example.com",
            &[
                Permission::new("admin", true, true, true),
                Permission::new("viewer", true, false, false),
            ],
            &[],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn slow_server_times_out_as_transport_error() {
    let addr = spawn_server().await;
    let client = ApiClient::connect(
        ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_millis(200)),
        StaticToken(TOKEN.into()),
        Anonymous,
    )
    .unwrap();
    match client.flush_cache().await.unwrap_err() {
        Error::Transport(e) => assert_eq!(e.kind, TransportErrorKind::Timeout),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = signed_in(addr, None).list_zones(None, None).await.unwrap_err();
    assert!(err.is_transport(), "got {err:?}");
}

#[tokio::test]
async fn log_download_returns_plain_text() {
    let addr = spawn_server().await;
    let text = signed_in(addr, None).download_log("2024-05-28").await.unwrap();
    assert_eq!(text, "log file 2024-05-28\nline 2\n");
}

#[tokio::test]
async fn node_override_beats_selector() {
    let addr = spawn_server().await;
    let client = signed_in(addr, Some("node2"));
    let zones: dns_admin_client::api::zones::ZoneList = client
        .call(
            dns_admin_client::ApiRequest::get("zones/list").node(NodeOverride::Node("node3".into())),
        )
        .await
        .unwrap();
    assert_eq!(zones.zones[0].name, "node3.example");
}
