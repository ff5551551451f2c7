use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::system::admins::{Admin, CreateAdminDto, SyncAdminsResponse, UpdateAdminDto};

use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiResult, ServiceError};
use crate::system::admins::service;
use crate::system::auth::extractor::CurrentAdmin;

/// GET /api/system/admins
pub async fn list() -> ApiResult<Json<Vec<Admin>>> {
    Ok(Json(service::list_all(get_connection()).await?))
}

/// GET /api/system/admins/:id
pub async fn get(Path(id): Path<String>) -> ApiResult<Json<Admin>> {
    let admin = service::get_by_id(get_connection(), &id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Admin".into()))?;
    Ok(Json(admin))
}

/// POST /api/system/admins
pub async fn create(
    CurrentAdmin(claims): CurrentAdmin,
    Json(dto): Json<CreateAdminDto>,
) -> ApiResult<(StatusCode, Json<Admin>)> {
    let admin = service::create(get_connection(), dto).await?;
    tracing::info!("Admin {} created by {}", admin.username, claims.username);
    Ok((StatusCode::CREATED, Json(admin)))
}

/// PUT /api/system/admins/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<UpdateAdminDto>,
) -> ApiResult<Json<Admin>> {
    Ok(Json(service::update(get_connection(), &id, dto).await?))
}

/// DELETE /api/system/admins/:id
pub async fn delete(
    CurrentAdmin(claims): CurrentAdmin,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    service::delete(get_connection(), &id, &claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/system/admins/:id/upgrade
///
/// Доступно без прав супер-администратора, пока в системе нет ни одного.
pub async fn upgrade_to_super_admin(
    CurrentAdmin(claims): CurrentAdmin,
    Path(id): Path<String>,
) -> ApiResult<Json<Admin>> {
    Ok(Json(
        service::upgrade_to_super_admin(get_connection(), &id, &claims).await?,
    ))
}

/// POST /api/system/admins/sync
pub async fn sync() -> ApiResult<Json<SyncAdminsResponse>> {
    let synced = service::sync_permissions(get_connection()).await?;
    Ok(Json(SyncAdminsResponse { synced }))
}
