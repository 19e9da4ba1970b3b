//! Sessions, users, groups and section permissions.
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::permissions::{Permission, PermissionLayout, format_permissions};
use crate::request::ApiRequest;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub username: String,
    pub is_current_session: bool,
    pub partial_token: String,
    #[serde(rename = "type")]
    pub session_type: String, // "Standard" / "ApiToken"
    pub token_name: Option<String>,
    pub last_seen: DateTime<Utc>,
    pub last_seen_remote_address: Option<String>,
    pub last_seen_user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub username: String,
    pub display_name: String,
    pub disabled: bool,
    pub previous_session_logged_on: Option<DateTime<Utc>>,
    pub previous_session_remote_address: Option<String>,
    pub recent_session_logged_on: Option<DateTime<Utc>>,
    pub recent_session_remote_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub name: String,
    pub description: Option<String>,
}

/// Who may do what in one admin section (or one zone).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPermissions {
    pub section: String,
    pub sub_item: Option<String>,
    pub user_permissions: Vec<Permission>,
    pub group_permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Deserialize)]
struct SessionList {
    sessions: Vec<SessionSummary>,
}

#[derive(Debug, Clone, Deserialize)]
struct UserList {
    users: Vec<UserSummary>,
}

#[derive(Debug, Clone, Deserialize)]
struct GroupList {
    groups: Vec<Group>,
}

#[derive(Debug, Clone, Deserialize)]
struct PermissionList {
    permissions: Vec<SectionPermissions>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let list: SessionList = self.call(ApiRequest::get("admin/sessions/list")).await?;
        Ok(list.sessions)
    }

    pub async fn delete_session(&self, partial_token: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("admin/sessions/delete").param("partialToken", partial_token))
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let list: UserList = self.call(ApiRequest::get("admin/users/list")).await?;
        Ok(list.users)
    }

    pub async fn create_user(&self, user: &str, pass: &str, display_name: Option<&str>) -> Result<()> {
        self.call_ack(
            ApiRequest::post_form("admin/users/create")
                .param("user", user)
                .param("pass", pass)
                .param_opt("displayName", display_name),
        )
        .await
    }

    pub async fn delete_user(&self, user: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("admin/users/delete").param("user", user))
            .await
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let list: GroupList = self.call(ApiRequest::get("admin/groups/list")).await?;
        Ok(list.groups)
    }

    pub async fn list_permissions(&self) -> Result<Vec<SectionPermissions>> {
        let list: PermissionList = self.call(ApiRequest::get("admin/permissions/list")).await?;
        Ok(list.permissions)
    }

    pub async fn section_permissions(&self, section: &str) -> Result<SectionPermissions> {
        self.call(
            ApiRequest::get("admin/permissions/get")
                .param("section", section)
                .param("includeUsersAndGroups", true),
        )
        .await
    }

    /// Replace a section's grants. `layout` selects whether the create flag
    /// is part of each entry for this section; every entry's `can_create`
    /// must agree with it or nothing is sent.
    pub async fn set_section_permissions(
        &self,
        section: &str,
        users: &[Permission],
        groups: &[Permission],
        layout: PermissionLayout,
    ) -> Result<()> {
        self.call_ack(
            ApiRequest::post_form("admin/permissions/set")
                .param("section", section)
                .param("userPermissions", format_permissions(users, layout)?)
                .param("groupPermissions", format_permissions(groups, layout)?),
        )
        .await
    }
}
