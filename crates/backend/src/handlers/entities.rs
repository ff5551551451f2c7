use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::list_query::ListParams;
use contracts::system::admins::SeedRolesResponse;
use serde_json::{Map, Value};

use crate::domain::{a007_role, entity_store::service};
use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiResult, ServiceError};

/// GET /api/entities/:entity?sort=-created_date&limit=50
pub async fn list(
    Path(entity): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Value>>> {
    Ok(Json(service::list(get_connection(), &entity, &params).await?))
}

/// POST /api/entities/:entity/filter
///
/// Тело: объект поле -> значение (точное совпадение).
async fn filter(
    entity: &str,
    params: &ListParams,
    query: &Map<String, Value>,
) -> ApiResult<Json<Vec<Value>>> {
    Ok(Json(
        service::filter(get_connection(), entity, query, params).await?,
    ))
}

/// POST /api/entities/:entity/:action
///
/// `filter` для любой сущности и `seed` для ролей. Действия делят
/// сегмент пути с `:id`, поэтому разбираются здесь.
pub async fn action(
    Path((entity, action)): Path<(String, String)>,
    Query(params): Query<ListParams>,
    payload: Option<Json<Map<String, Value>>>,
) -> ApiResult<Response> {
    match (entity.as_str(), action.as_str()) {
        (_, "filter") => {
            let query = payload.map(|Json(q)| q).unwrap_or_default();
            Ok(filter(&entity, &params, &query).await?.into_response())
        }
        ("role", "seed") => Ok(seed_roles().await?.into_response()),
        _ => Err(ServiceError::NotFound(format!("Action '{}/{}'", entity, action)).into()),
    }
}

/// GET /api/entities/:entity/:id
pub async fn get(Path((entity, id)): Path<(String, String)>) -> ApiResult<Json<Value>> {
    Ok(Json(service::get(get_connection(), &entity, &id).await?))
}

/// POST /api/entities/:entity
pub async fn create(
    Path(entity): Path<String>,
    Json(data): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let created = service::create(get_connection(), &entity, data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/entities/:entity/:id
pub async fn update(
    Path((entity, id)): Path<(String, String)>,
    Json(data): Json<Value>,
) -> ApiResult<Json<Value>> {
    Ok(Json(service::update(get_connection(), &entity, &id, data).await?))
}

/// DELETE /api/entities/:entity/:id
pub async fn delete(Path((entity, id)): Path<(String, String)>) -> ApiResult<StatusCode> {
    service::delete(get_connection(), &entity, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/entities/role/seed
async fn seed_roles() -> ApiResult<Json<SeedRolesResponse>> {
    let created = a007_role::service::seed(get_connection()).await?;
    Ok(Json(SeedRolesResponse { created }))
}
