//! Sign-in and the caller's own session.
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::{ApiRequest, NodeOverride};
use crate::value::Value;

/// Returned by sign-in and session lookup. These endpoints put their fields
/// beside `status` rather than under `response`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub display_name: String,
    pub username: String,
    pub token: String,
    pub info: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiToken {
    pub username: String,
    pub token_name: String,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheck {
    pub update_available: bool,
    pub current_version: String,
    pub update_version: Option<String>,
    pub update_title: Option<String>,
    pub update_message: Option<String>,
    pub download_link: Option<String>,
    pub instructions_link: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    /// Exchange credentials for a session token. The token is returned to
    /// the caller; storing it is the session owner's business.
    pub async fn login(&self, user: &str, pass: &str) -> Result<LoginResponse> {
        self.call_flat(
            ApiRequest::get("user/login")
                .param("user", user)
                .param("pass", pass)
                .param("includeInfo", true)
                .node(NodeOverride::Omit)
                .anonymous(),
        )
        .await
    }

    /// Create a non-expiring API token for automation.
    pub async fn create_api_token(&self, user: &str, pass: &str, token_name: &str) -> Result<ApiToken> {
        self.call_flat(
            ApiRequest::get("user/createToken")
                .param("user", user)
                .param("pass", pass)
                .param("tokenName", token_name)
                .node(NodeOverride::Omit)
                .anonymous(),
        )
        .await
    }

    pub async fn logout(&self) -> Result<()> {
        self.call_ack(ApiRequest::get("user/logout").node(NodeOverride::Omit))
            .await
    }

    /// Session details for the current token.
    pub async fn session_info(&self) -> Result<LoginResponse> {
        self.call_flat(ApiRequest::get("user/session/get").node(NodeOverride::Omit))
            .await
    }

    pub async fn change_password(&self, new_pass: &str) -> Result<()> {
        self.call_ack(
            ApiRequest::post_form("user/changePassword")
                .param("pass", new_pass)
                .node(NodeOverride::Omit),
        )
        .await
    }

    pub async fn check_for_update(&self) -> Result<UpdateCheck> {
        self.call(ApiRequest::get("user/checkForUpdate")).await
    }
}
