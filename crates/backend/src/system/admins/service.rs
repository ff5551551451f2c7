use anyhow::Result;
use chrono::Utc;
use contracts::domain::a007_role::aggregate::Role;
use contracts::domain::common::require_email;
use contracts::system::admins::{
    can_upgrade_to_super_admin, effective_permissions, Admin, CreateAdminDto, UpdateAdminDto,
};
use contracts::system::auth::{AdminInfo, TokenClaims};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::domain::a007_role::service as role_service;
use crate::domain::entity_store::store::EntityStore;
use crate::shared::error::ServiceError;
use crate::system::auth::password;

pub fn to_admin_info(admin: &Admin) -> AdminInfo {
    AdminInfo {
        id: admin.id.clone(),
        username: admin.username.clone(),
        full_name: admin.full_name.clone(),
        email: admin.email.clone(),
        is_super_admin: admin.is_super_admin,
        permissions: admin.permissions.clone(),
    }
}

fn validate_email(email: &Option<String>) -> Result<()> {
    if let Some(email) = email.as_deref().filter(|e| !e.trim().is_empty()) {
        require_email(email).map_err(ServiceError::Validation)?;
    }
    Ok(())
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn load_role(db: &DatabaseConnection, role_id: Option<&str>) -> Result<Option<Role>> {
    let Some(role_id) = role_id else {
        return Ok(None);
    };
    let id = uuid::Uuid::parse_str(role_id)
        .map_err(|_| ServiceError::Validation(format!("Invalid role id: {}", role_id)))?;
    let value = role_service::store()
        .get(db, id)
        .await?
        .ok_or_else(|| ServiceError::Validation("Role not found".into()))?;
    Ok(Some(serde_json::from_value(value)?))
}

pub async fn create(db: &DatabaseConnection, dto: CreateAdminDto) -> Result<Admin> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        return Err(ServiceError::Validation("Username cannot be empty".into()).into());
    }
    if repository::get_by_username(db, &username).await?.is_some() {
        return Err(ServiceError::Conflict(format!("Username '{}'", username)).into());
    }
    let email = normalize(dto.email);
    validate_email(&email)?;
    password::validate_password_strength(&dto.password).map_err(|e| ServiceError::Validation(e.to_string()))?;

    let role_id = normalize(dto.role_id);
    let role = load_role(db, role_id.as_deref()).await?;
    let password_hash = password::hash_password(&dto.password)?;
    let now = Utc::now().to_rfc3339();

    let admin = Admin {
        id: uuid::Uuid::new_v4().to_string(),
        username,
        email,
        full_name: normalize(dto.full_name),
        role_id,
        is_super_admin: false,
        is_active: true,
        permissions: effective_permissions(false, role.as_ref()),
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(db, &admin, &password_hash).await?;
    tracing::info!("Created admin {} ({})", admin.username, admin.id);
    Ok(admin)
}

pub async fn update(db: &DatabaseConnection, id: &str, dto: UpdateAdminDto) -> Result<Admin> {
    let mut admin = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Admin".into()))?;

    let email = normalize(dto.email);
    validate_email(&email)?;

    // Все проверки до первой записи
    let password_hash = match dto.password.filter(|p| !p.is_empty()) {
        Some(new_password) => {
            password::validate_password_strength(&new_password)
                .map_err(|e| ServiceError::Validation(e.to_string()))?;
            Some(password::hash_password(&new_password)?)
        }
        None => None,
    };

    if admin.is_super_admin
        && admin.is_active
        && !dto.is_active
        && repository::count_super_admins(db).await? <= 1
    {
        return Err(ServiceError::Validation("Cannot deactivate the last super admin".into()).into());
    }

    let role_id = normalize(dto.role_id);
    let role = load_role(db, role_id.as_deref()).await?;

    admin.email = email;
    admin.full_name = normalize(dto.full_name);
    admin.role_id = role_id;
    admin.is_active = dto.is_active;
    admin.permissions = effective_permissions(admin.is_super_admin, role.as_ref());
    admin.updated_at = Utc::now().to_rfc3339();
    repository::update(db, &admin).await?;

    if let Some(hash) = password_hash {
        repository::update_password(db, id, &hash).await?;
    }

    Ok(admin)
}

pub async fn delete(db: &DatabaseConnection, id: &str, caller_id: &str) -> Result<()> {
    if id == caller_id {
        return Err(ServiceError::Validation("You cannot delete your own account".into()).into());
    }
    let admin = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Admin".into()))?;
    // count_super_admins считает только активных
    if admin.is_super_admin && admin.is_active && repository::count_super_admins(db).await? <= 1 {
        return Err(ServiceError::Validation("Cannot delete the last super admin".into()).into());
    }
    repository::delete(db, id).await?;
    tracing::info!("Deleted admin {}", admin.username);
    Ok(())
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Admin>> {
    repository::get_by_id(db, id).await
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Admin>> {
    repository::list_all(db).await
}

/// `Admin.upgradeToSuperAdmin`
pub async fn upgrade_to_super_admin(
    db: &DatabaseConnection,
    id: &str,
    caller: &TokenClaims,
) -> Result<Admin> {
    let super_admins = repository::count_super_admins(db).await?;
    if !can_upgrade_to_super_admin(caller.is_super_admin, super_admins) {
        return Err(ServiceError::Forbidden("only a super admin can grant super admin".into()).into());
    }

    let mut admin = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Admin".into()))?;
    admin.is_super_admin = true;
    admin.is_active = true;
    admin.permissions = effective_permissions(true, None);
    admin.updated_at = Utc::now().to_rfc3339();
    repository::update(db, &admin).await?;

    tracing::warn!("Admin {} upgraded to super admin by {}", admin.username, caller.username);
    Ok(admin)
}

/// `Admin.sync`: права пересчитываются из ролей; возвращает число изменённых записей
pub async fn sync_permissions(db: &DatabaseConnection) -> Result<usize> {
    let roles = role_service::list_all(db).await?;
    let mut synced = 0;

    for mut admin in repository::list_all(db).await? {
        let role = admin
            .role_id
            .as_deref()
            .and_then(|rid| roles.iter().find(|r| r.meta.id.to_string() == rid));
        let permissions = effective_permissions(admin.is_super_admin, role);
        if permissions != admin.permissions {
            admin.permissions = permissions;
            admin.updated_at = Utc::now().to_rfc3339();
            repository::update(db, &admin).await?;
            synced += 1;
        }
    }

    tracing::info!("Synced permissions for {} admins", synced);
    Ok(synced)
}

/// Проверка логина; неактивный администратор не входит
pub async fn verify_credentials(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<Admin>> {
    let Some(admin) = repository::get_by_username(db, username.trim()).await? else {
        return Ok(None);
    };
    if !admin.is_active {
        return Err(ServiceError::Forbidden("account is inactive".into()).into());
    }
    let hash = repository::get_password_hash(db, &admin.id)
        .await?
        .ok_or_else(|| ServiceError::Internal("password hash not found".into()))?;
    if !password::verify_password(password, &hash)? {
        return Ok(None);
    }
    if let Err(e) = repository::update_last_login(db, &admin.id).await {
        tracing::warn!("Failed to update last login for {}: {}", admin.username, e);
    }
    Ok(Some(admin))
}

/// Создать `admin/admin` с правами супер-администратора, если администраторов нет
pub async fn ensure_default_admin(db: &DatabaseConnection) -> Result<Option<Admin>> {
    if repository::count_admins(db).await? > 0 {
        return Ok(None);
    }

    let mut admin = create(
        db,
        CreateAdminDto {
            username: "admin".to_string(),
            password: "admin".to_string(),
            email: None,
            full_name: Some("Administrator".to_string()),
            role_id: None,
        },
    )
    .await?;
    admin.is_super_admin = true;
    admin.permissions = effective_permissions(true, None);
    repository::update(db, &admin).await?;
    Ok(Some(admin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::shared::sections::AdminSection;

    fn claims(admin: &Admin) -> TokenClaims {
        TokenClaims {
            sub: admin.id.clone(),
            username: admin.username.clone(),
            is_super_admin: admin.is_super_admin,
            exp: 0,
            iat: 0,
        }
    }

    fn dto(username: &str) -> CreateAdminDto {
        CreateAdminDto {
            username: username.to_string(),
            password: "secret1".to_string(),
            email: Some("ops@joltcab.test".to_string()),
            full_name: None,
            role_id: None,
        }
    }

    #[tokio::test]
    async fn test_default_admin_created_once() {
        let db = connect_in_memory().await;
        let admin = ensure_default_admin(&db).await.unwrap().unwrap();
        assert!(admin.is_super_admin);
        assert!(ensure_default_admin(&db).await.unwrap().is_none());

        let logged_in = verify_credentials(&db, "admin", "admin").await.unwrap();
        assert!(logged_in.is_some());
        assert!(verify_credentials(&db, "admin", "wrong").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let db = connect_in_memory().await;
        create(&db, dto("ops")).await.unwrap();
        let err = create(&db, dto("OPS")).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_upgrade_rules() {
        let db = connect_in_memory().await;
        let first = create(&db, dto("first")).await.unwrap();
        let second = create(&db, dto("second")).await.unwrap();

        // пока супер-админов нет, повысить может любой
        let first = upgrade_to_super_admin(&db, &first.id, &claims(&first)).await.unwrap();
        assert!(first.is_super_admin);
        assert_eq!(first.permissions.len(), AdminSection::all().len());

        let err = upgrade_to_super_admin(&db, &second.id, &claims(&second))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast::<ServiceError>().unwrap(),
            ServiceError::Forbidden(_)
        ));

        upgrade_to_super_admin(&db, &second.id, &claims(&first)).await.unwrap();
    }

    #[tokio::test]
    async fn test_sync_recomputes_from_role() {
        let db = connect_in_memory().await;
        role_service::seed(&db).await.unwrap();
        let roles = role_service::list_all(&db).await.unwrap();
        let support = roles.iter().find(|r| r.name == "Support Agent").unwrap();

        let mut request = dto("agent");
        request.role_id = Some(support.meta.id.to_string());
        let agent = create(&db, request).await.unwrap();
        assert_eq!(agent.permissions, support.permissions);

        // рассинхронизация: права сброшены вручную
        let mut stale = agent.clone();
        stale.permissions.clear();
        repository::update(&db, &stale).await.unwrap();

        assert_eq!(sync_permissions(&db).await.unwrap(), 1);
        assert_eq!(sync_permissions(&db).await.unwrap(), 0);
        let synced = get_by_id(&db, &agent.id).await.unwrap().unwrap();
        assert_eq!(synced.permissions, support.permissions);
    }

    #[tokio::test]
    async fn test_cannot_delete_self_or_last_super_admin() {
        let db = connect_in_memory().await;
        let root = ensure_default_admin(&db).await.unwrap().unwrap();
        let ops = create(&db, dto("ops")).await.unwrap();

        assert!(delete(&db, &root.id, &root.id).await.is_err());
        assert!(delete(&db, &root.id, &ops.id).await.is_err());
        delete(&db, &ops.id, &root.id).await.unwrap();
        assert!(get_by_id(&db, &ops.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_with_weak_password_writes_nothing() {
        let db = connect_in_memory().await;
        let ops = create(&db, dto("ops")).await.unwrap();

        let err = update(
            &db,
            &ops.id,
            UpdateAdminDto {
                email: None,
                full_name: Some("New Name".into()),
                role_id: None,
                is_active: false,
                password: Some("x".into()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast::<ServiceError>().unwrap(),
            ServiceError::Validation(_)
        ));

        let stored = get_by_id(&db, &ops.id).await.unwrap().unwrap();
        assert_eq!(stored.full_name, None);
        assert!(stored.is_active);
        assert!(verify_credentials(&db, "ops", "secret1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_inactive_super_admin_can_be_deleted() {
        let db = connect_in_memory().await;
        let root = ensure_default_admin(&db).await.unwrap().unwrap();
        let ops = create(&db, dto("ops")).await.unwrap();
        let ops = upgrade_to_super_admin(&db, &ops.id, &claims(&root)).await.unwrap();

        update(
            &db,
            &ops.id,
            UpdateAdminDto {
                email: ops.email.clone(),
                full_name: None,
                role_id: None,
                is_active: false,
                password: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(repository::count_super_admins(&db).await.unwrap(), 1);

        delete(&db, &ops.id, &root.id).await.unwrap();
        assert!(get_by_id(&db, &ops.id).await.unwrap().is_none());
    }
}
