use contracts::system::settings::{AppSettings, ConfigStatus};

use super::http;

pub async fn get() -> Result<AppSettings, String> {
    http::get_json("/api/system/settings").await
}

pub async fn update(settings: &AppSettings) -> Result<AppSettings, String> {
    http::put_json("/api/system/settings", settings).await
}

/// `settings.getConfigStatus`
pub async fn config_status() -> Result<ConfigStatus, String> {
    http::get_json("/api/system/settings/status").await
}
