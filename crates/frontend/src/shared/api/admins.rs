use contracts::system::admins::{
    Admin, CreateAdminDto, SeedRolesResponse, SyncAdminsResponse, UpdateAdminDto,
};

use super::http;

pub async fn list() -> Result<Vec<Admin>, String> {
    http::get_json("/api/system/admins").await
}

pub async fn create(dto: &CreateAdminDto) -> Result<Admin, String> {
    http::post_json("/api/system/admins", dto).await
}

pub async fn update(id: &str, dto: &UpdateAdminDto) -> Result<Admin, String> {
    http::put_json(&format!("/api/system/admins/{}", id), dto).await
}

pub async fn delete(id: &str) -> Result<(), String> {
    http::delete(&format!("/api/system/admins/{}", id)).await
}

/// `Admin.upgradeToSuperAdmin`
pub async fn upgrade_to_super_admin(id: &str) -> Result<Admin, String> {
    http::post_json(
        &format!("/api/system/admins/{}/upgrade", id),
        &serde_json::json!({}),
    )
    .await
}

/// `Admin.sync`
pub async fn sync() -> Result<SyncAdminsResponse, String> {
    http::post_json("/api/system/admins/sync", &serde_json::json!({})).await
}

/// `Role.seed`
pub async fn seed_roles() -> Result<SeedRolesResponse, String> {
    http::post_json("/api/entities/role/seed", &serde_json::json!({})).await
}
