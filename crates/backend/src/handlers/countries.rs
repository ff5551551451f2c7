use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_country::aggregate::Country;
use serde_json::Value;

use crate::domain::{a001_country, entity_store::service::parse_id};
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiResult;

/// GET /api/countries
pub async fn list() -> ApiResult<Json<Vec<Country>>> {
    Ok(Json(a001_country::service::list_all(get_connection()).await?))
}

/// POST /api/countries
pub async fn create(Json(data): Json<Value>) -> ApiResult<(StatusCode, Json<Value>)> {
    let created = a001_country::service::create(get_connection(), data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/countries/:id
pub async fn update(Path(id): Path<String>, Json(data): Json<Value>) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    Ok(Json(
        a001_country::service::update(get_connection(), id, data).await?,
    ))
}
