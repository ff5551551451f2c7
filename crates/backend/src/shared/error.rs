use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Ошибки сервисов, которые доходят до клиента со своим HTTP-статусом
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    /// Сообщение содержит "already exists"; клиент распознаёт его по тексту
    #[error("{0} already exists")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Обёртка над `anyhow::Error` для ответа handler'а
///
/// Если внутри лежит `ServiceError`, статус берётся из него, иначе 500.
/// Тело всегда `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.0
            .downcast_ref::<ServiceError>()
            .map(ServiceError::status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn message(&self) -> String {
        match self.0.downcast_ref::<ServiceError>() {
            Some(e) => e.to_string(),
            None => format!("{:#}", self.0),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::warn!("{} {}", status.as_u16(), message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_maps_to_status() {
        let err = ApiError::from(ServiceError::Conflict("Price configuration".into()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert!(err.message().contains("already exists"));

        let err = ApiError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "disk full");
    }

    #[test]
    fn test_wrapped_service_error_keeps_status() {
        let err: anyhow::Error = ServiceError::NotFound("Country".into()).into();
        let err = ApiError::from(err.context("loading country"));
        // context поверх ServiceError не меняет статус
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
