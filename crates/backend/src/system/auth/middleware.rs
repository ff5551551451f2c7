use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use contracts::system::auth::TokenClaims;

use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiError, ServiceError};

/// Токен из `Authorization: Bearer ...`; копия, чтобы не держать запрос через `.await`
fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn validate(token: Option<String>) -> Result<TokenClaims, ApiError> {
    let token = token.ok_or(ServiceError::Unauthorized)?;
    super::jwt::validate_token(get_connection(), &token)
        .await
        .map_err(|_| ServiceError::Unauthorized.into())
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(&req);
    let claims = validate(token).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Только для супер-администраторов
pub async fn require_super_admin(
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req);
    let claims = validate(token).await?;
    if !claims.is_super_admin {
        return Err(ServiceError::Forbidden("super admin access required".into()).into());
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/system/auth/me");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&request(Some("Bearer abc.def"))).as_deref(), Some("abc.def"));
        assert_eq!(bearer_token(&request(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&request(None)), None);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        assert!(validate(None).await.is_err());
    }
}
