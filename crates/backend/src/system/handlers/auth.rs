use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{
    AdminInfo, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
};

use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiResult, ServiceError};
use crate::system::admins::service as admin_service;
use crate::system::auth::extractor::CurrentAdmin;
use crate::system::auth::{jwt, refresh_tokens};

/// POST /api/system/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<Json<LoginResponse>> {
    let db = get_connection();
    let admin = admin_service::verify_credentials(db, &request.username, &request.password)
        .await?
        .ok_or(ServiceError::Unauthorized)?;

    let access_token =
        jwt::generate_access_token(db, &admin.id, &admin.username, admin.is_super_admin).await?;
    let refresh_token = jwt::generate_refresh_token();
    refresh_tokens::store(db, &admin.id, &refresh_token).await?;

    tracing::info!("Admin {} logged in", admin.username);

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        admin: admin_service::to_admin_info(&admin),
    }))
}

/// POST /api/system/auth/refresh
pub async fn refresh(Json(request): Json<RefreshRequest>) -> ApiResult<Json<RefreshResponse>> {
    let db = get_connection();
    let admin_id = refresh_tokens::validate(db, &request.refresh_token).await?;

    let admin = admin_service::get_by_id(db, &admin_id)
        .await?
        .filter(|a| a.is_active)
        .ok_or(ServiceError::Unauthorized)?;

    let access_token =
        jwt::generate_access_token(db, &admin.id, &admin.username, admin.is_super_admin).await?;

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/system/auth/logout
pub async fn logout(Json(request): Json<RefreshRequest>) -> ApiResult<StatusCode> {
    refresh_tokens::revoke(get_connection(), &request.refresh_token).await?;
    Ok(StatusCode::OK)
}

/// GET /api/system/auth/me
pub async fn current_admin(CurrentAdmin(claims): CurrentAdmin) -> ApiResult<Json<AdminInfo>> {
    let admin = admin_service::get_by_id(get_connection(), &claims.sub)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Admin".into()))?;
    Ok(Json(admin_service::to_admin_info(&admin)))
}
