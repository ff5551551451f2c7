use axum::extract::Json;
use contracts::system::settings::{AppSettings, ConfigStatus};

use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiResult, ServiceError};
use crate::system::auth::extractor::CurrentAdmin;
use crate::system::settings::service;

/// GET /api/system/settings (секреты маскируются)
pub async fn get() -> ApiResult<Json<AppSettings>> {
    Ok(Json(service::get(get_connection()).await?))
}

/// PUT /api/system/settings (только супер-администратор)
pub async fn update(
    CurrentAdmin(claims): CurrentAdmin,
    Json(settings): Json<AppSettings>,
) -> ApiResult<Json<AppSettings>> {
    if !claims.is_super_admin {
        return Err(ServiceError::Forbidden("super admin access required".into()).into());
    }
    let saved = service::update(get_connection(), settings).await?;
    tracing::info!("Settings updated by {}", claims.username);
    Ok(Json(saved))
}

/// GET /api/system/settings/status
pub async fn status() -> ApiResult<Json<ConfigStatus>> {
    Ok(Json(service::config_status(get_connection()).await?))
}
