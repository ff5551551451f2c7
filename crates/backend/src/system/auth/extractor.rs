use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use contracts::system::auth::TokenClaims;

use crate::shared::error::{ApiError, ServiceError};

/// Текущий администратор из JWT (кладёт middleware `require_auth`)
///
/// `async fn handler(CurrentAdmin(claims): CurrentAdmin) -> ...`
pub struct CurrentAdmin(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or_else(|| ServiceError::Unauthorized.into())
    }
}
