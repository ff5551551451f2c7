use axum::{
    extract::{Multipart, Path},
    Json,
};
use contracts::system::functions::{
    GeocodeRequest, GeocodeResponse, UploadResponse, FN_GEOCODE, FN_R2_UPLOAD, FN_SYNC_COUNTRIES,
};
use serde_json::Value;

use crate::domain::a002_city;
use crate::shared::config;
use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiResult, ServiceError};
use crate::shared::uploads;
use crate::usecases::u501_sync_countries;

/// POST /api/functions/:name
pub async fn invoke(Path(name): Path<String>, Json(payload): Json<Value>) -> ApiResult<Json<Value>> {
    let db = get_connection();
    let result = match name.as_str() {
        FN_GEOCODE => {
            let request: GeocodeRequest = serde_json::from_value(payload)
                .map_err(|e| ServiceError::Validation(format!("Invalid geocode request: {}", e)))?;
            let results = a002_city::service::geocode(db, &request.query).await?;
            serde_json::to_value(GeocodeResponse { results })?
        }
        FN_SYNC_COUNTRIES => serde_json::to_value(u501_sync_countries::executor::execute(db).await?)?,
        FN_R2_UPLOAD => {
            return Err(ServiceError::Validation(
                "r2Upload expects multipart/form-data".into(),
            )
            .into())
        }
        other => return Err(ServiceError::NotFound(format!("Function '{}'", other)).into()),
    };
    Ok(Json(result))
}

/// POST /api/functions/r2Upload (multipart, поле `file`)
pub async fn r2_upload(mut multipart: Multipart) -> ApiResult<Json<UploadResponse>> {
    let cfg = config::current();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("file").to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ServiceError::Validation("Uploaded file is empty".into()).into());
        }
        let file_url = uploads::save_file(
            &config::get_uploads_dir(cfg),
            &cfg.uploads.public_base,
            &file_name,
            &bytes,
        )
        .await?;
        return Ok(Json(UploadResponse {
            success: true,
            file_url,
        }));
    }
    Err(ServiceError::Validation("Missing 'file' field".into()).into())
}
