use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::request::ApiRequest;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsApp {
    pub class_path: String,
    pub description: Option<String>,
    pub is_app_record_request_handler: Option<bool>,
    pub record_data_template: Option<String>,
    pub is_request_controller: Option<bool>,
    pub is_authoritative_request_handler: Option<bool>,
    pub is_request_blocking_handler: Option<bool>,
    pub is_query_logger: Option<bool>,
    pub is_post_processor: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledApp {
    pub name: String,
    pub version: String,
    pub update_version: Option<String>,
    pub update_url: Option<String>,
    pub update_available: Option<bool>,
    pub dns_apps: Vec<DnsApp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreApp {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub url: String,
    pub size: Option<String>,
    pub installed: bool,
    pub installed_version: Option<String>,
    pub update_available: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct AppList {
    apps: Vec<InstalledApp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreAppList {
    store_apps: Vec<StoreApp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Installed {
    installed_app: InstalledApp,
}

#[derive(Debug, Clone, Deserialize)]
struct AppConfig {
    config: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_apps(&self) -> Result<Vec<InstalledApp>> {
        let list: AppList = self.call(ApiRequest::get("apps/list")).await?;
        Ok(list.apps)
    }

    pub async fn list_store_apps(&self) -> Result<Vec<StoreApp>> {
        let list: StoreAppList = self.call(ApiRequest::get("apps/listStoreApps")).await?;
        Ok(list.store_apps)
    }

    pub async fn install_app(&self, name: &str, url: &str) -> Result<InstalledApp> {
        let installed: Installed = self
            .call(
                ApiRequest::get("apps/downloadAndInstall")
                    .param("name", name)
                    .param("url", url),
            )
            .await?;
        Ok(installed.installed_app)
    }

    pub async fn uninstall_app(&self, name: &str) -> Result<()> {
        self.call_ack(ApiRequest::get("apps/uninstall").param("name", name))
            .await
    }

    /// The app's config document; `None` when the app has none.
    pub async fn app_config(&self, name: &str) -> Result<Option<String>> {
        let config: AppConfig = self
            .call(ApiRequest::get("apps/config/get").param("name", name))
            .await?;
        Ok(config.config)
    }

    pub async fn set_app_config(&self, name: &str, config: &str) -> Result<()> {
        self.call_ack(
            ApiRequest::post_form("apps/config/set")
                .param("name", name)
                .param("config", config),
        )
        .await
    }
}
