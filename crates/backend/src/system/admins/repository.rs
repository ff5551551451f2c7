use anyhow::{Context, Result};
use contracts::system::admins::Admin;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, QueryResult, Statement};

const ADMIN_COLUMNS: &str = "id, username, email, full_name, role_id, is_super_admin, is_active, \
     permissions, created_at, updated_at, last_login_at";

fn admin_from_row(row: &QueryResult) -> Result<Admin> {
    let permissions: String = row.try_get("", "permissions")?;
    Ok(Admin {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        full_name: row.try_get("", "full_name")?,
        role_id: row.try_get("", "role_id")?,
        is_super_admin: row.try_get::<i32>("", "is_super_admin")? != 0,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        permissions: serde_json::from_str(&permissions).unwrap_or_default(),
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

fn flag(value: bool) -> i32 {
    if value {
        1
    } else {
        0
    }
}

pub async fn create_with_password(
    db: &DatabaseConnection,
    admin: &Admin,
    password_hash: &str,
) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_admins (id, username, email, password_hash, full_name, role_id, is_super_admin, is_active, permissions, created_at, updated_at, last_login_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            admin.id.clone().into(),
            admin.username.clone().into(),
            admin.email.clone().into(),
            password_hash.to_string().into(),
            admin.full_name.clone().into(),
            admin.role_id.clone().into(),
            flag(admin.is_super_admin).into(),
            flag(admin.is_active).into(),
            serde_json::to_string(&admin.permissions)?.into(),
            admin.created_at.clone().into(),
            admin.updated_at.clone().into(),
            admin.last_login_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert admin")?;
    Ok(())
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Admin>> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_admins WHERE id = ?", ADMIN_COLUMNS),
            [id.into()],
        ))
        .await?;
    row.as_ref().map(admin_from_row).transpose()
}

pub async fn get_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Admin>> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM sys_admins WHERE username = ? COLLATE NOCASE",
                ADMIN_COLUMNS
            ),
            [username.into()],
        ))
        .await?;
    row.as_ref().map(admin_from_row).transpose()
}

pub async fn get_password_hash(db: &DatabaseConnection, id: &str) -> Result<Option<String>> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_admins WHERE id = ?",
            [id.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(Some(row.try_get("", "password_hash")?)),
        None => Ok(None),
    }
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Admin>> {
    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM sys_admins ORDER BY created_at DESC", ADMIN_COLUMNS),
        ))
        .await?;
    rows.iter().map(admin_from_row).collect()
}

pub async fn update(db: &DatabaseConnection, admin: &Admin) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_admins
         SET email = ?, full_name = ?, role_id = ?, is_super_admin = ?, is_active = ?, permissions = ?, updated_at = ?
         WHERE id = ?",
        [
            admin.email.clone().into(),
            admin.full_name.clone().into(),
            admin.role_id.clone().into(),
            flag(admin.is_super_admin).into(),
            flag(admin.is_active).into(),
            serde_json::to_string(&admin.permissions)?.into(),
            admin.updated_at.clone().into(),
            admin.id.clone().into(),
        ],
    ))
    .await
    .context("Failed to update admin")?;
    Ok(())
}

/// Hard delete; refresh-токены администратора удаляются вместе с ним
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<bool> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM sys_refresh_tokens WHERE admin_id = ?",
        [id.into()],
    ))
    .await?;
    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_admins WHERE id = ?",
            [id.into()],
        ))
        .await
        .context("Failed to delete admin")?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_last_login(db: &DatabaseConnection, id: &str) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_admins SET last_login_at = ? WHERE id = ?",
        [now.into(), id.into()],
    ))
    .await
    .context("Failed to update last login")?;
    Ok(())
}

pub async fn update_password(db: &DatabaseConnection, id: &str, password_hash: &str) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_admins SET password_hash = ?, updated_at = ? WHERE id = ?",
        [
            password_hash.into(),
            chrono::Utc::now().to_rfc3339().into(),
            id.into(),
        ],
    ))
    .await
    .context("Failed to update password")?;
    Ok(())
}

pub async fn count_admins(db: &DatabaseConnection) -> Result<usize> {
    count(db, "SELECT COUNT(*) AS count FROM sys_admins").await
}

pub async fn count_super_admins(db: &DatabaseConnection) -> Result<usize> {
    count(
        db,
        "SELECT COUNT(*) AS count FROM sys_admins WHERE is_super_admin = 1 AND is_active = 1",
    )
    .await
}

async fn count(db: &DatabaseConnection, sql: &str) -> Result<usize> {
    let row = db
        .query_one(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
        .await?;
    match row {
        Some(row) => Ok(row.try_get::<i64>("", "count")? as usize),
        None => Ok(0),
    }
}
