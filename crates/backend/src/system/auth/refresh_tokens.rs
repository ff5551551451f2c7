use anyhow::Result;
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use sha2::{Digest, Sha256};

use super::jwt;
use crate::shared::error::ServiceError;

/// В базе хранится только SHA-256 от refresh token
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub async fn store(db: &DatabaseConnection, admin_id: &str, token: &str) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_refresh_tokens (id, admin_id, token_hash, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            uuid::Uuid::new_v4().to_string().into(),
            admin_id.to_string().into(),
            hash_token(token).into(),
            jwt::calculate_refresh_token_expiration().into(),
            Utc::now().to_rfc3339().into(),
        ],
    ))
    .await?;
    Ok(())
}

/// id администратора по действующему (не отозванному и не истёкшему) токену
pub async fn validate(db: &DatabaseConnection, token: &str) -> Result<String> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT admin_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [hash_token(token).into(), Utc::now().to_rfc3339().into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(row.try_get("", "admin_id")?),
        None => Err(ServiceError::Unauthorized.into()),
    }
}

pub async fn revoke(db: &DatabaseConnection, token: &str) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ?",
        [Utc::now().to_rfc3339().into(), hash_token(token).into()],
    ))
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_store_validate_revoke() {
        let db = connect_in_memory().await;
        let token = jwt::generate_refresh_token();
        store(&db, "admin-1", &token).await.unwrap();

        assert_eq!(validate(&db, &token).await.unwrap(), "admin-1");
        assert!(validate(&db, "unknown").await.is_err());

        revoke(&db, &token).await.unwrap();
        let err = validate(&db, &token).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ServiceError>(),
            Some(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn test_hash_is_not_plain_token() {
        let hash = hash_token("abc");
        assert_ne!(hash, "abc");
        assert_eq!(hash.len(), 64);
    }
}
