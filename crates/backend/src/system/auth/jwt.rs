use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::shared::config;

const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 30;
const JWT_SECRET_KEY: &str = "jwt_secret";

/// Access token живёт столько же, сколько сессия на клиенте (auth.session_ttl_hours)
pub async fn generate_access_token(
    db: &DatabaseConnection,
    admin_id: &str,
    username: &str,
    is_super_admin: bool,
) -> Result<String> {
    let now = Utc::now();
    let ttl = chrono::Duration::hours(config::current().auth.session_ttl_hours);
    let claims = TokenClaims {
        sub: admin_id.to_string(),
        username: username.to_string(),
        is_super_admin,
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let secret = get_jwt_secret(db).await?;
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

/// Validate JWT token and extract claims
pub async fn validate_token(db: &DatabaseConnection, token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret(db).await?;
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(token_data.claims)
}

pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Секрет хранится в sys_settings; при первом обращении генерируется
pub async fn get_jwt_secret(db: &DatabaseConnection) -> Result<String> {
    if let Some(secret) = load_secret(db).await? {
        return Ok(secret);
    }
    let secret = generate_jwt_secret();
    save_secret(db, &secret).await?;
    // параллельный запрос мог успеть записать свой секрет
    Ok(load_secret(db).await?.unwrap_or(secret))
}

/// 256 бит из криптографического генератора
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn load_secret(db: &DatabaseConnection) -> Result<Option<String>> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

async fn save_secret(db: &DatabaseConnection, secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR IGNORE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            JWT_SECRET_KEY.into(),
            secret.to_string().into(),
            "Auto-generated JWT secret for authentication".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;
    Ok(())
}

pub fn calculate_refresh_token_expiration() -> String {
    (Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS)).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_token_round_trip() {
        let db = connect_in_memory().await;
        let token = generate_access_token(&db, "a-1", "admin", true).await.unwrap();
        let claims = validate_token(&db, &token).await.unwrap();
        assert_eq!(claims.sub, "a-1");
        assert!(claims.is_super_admin);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_secret_is_stable() {
        let db = connect_in_memory().await;
        let first = get_jwt_secret(&db).await.unwrap();
        assert_eq!(get_jwt_secret(&db).await.unwrap(), first);
        assert!(validate_token(&db, "garbage").await.is_err());
    }
}
