use contracts::system::functions::{
    GeocodeRequest, GeocodeResponse, SyncCountriesResponse, UploadResponse, FN_GEOCODE,
    FN_R2_UPLOAD, FN_SYNC_COUNTRIES,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;

use super::http;

/// `functions.invoke(name, payload)`
pub async fn invoke<B: Serialize, T: DeserializeOwned>(name: &str, payload: &B) -> Result<T, String> {
    http::post_json(&format!("/api/functions/{}", name), payload).await
}

pub async fn geocode(query: &str) -> Result<GeocodeResponse, String> {
    invoke(
        FN_GEOCODE,
        &GeocodeRequest {
            query: query.to_string(),
        },
    )
    .await
}

pub async fn sync_countries() -> Result<SyncCountriesResponse, String> {
    invoke(FN_SYNC_COUNTRIES, &serde_json::json!({})).await
}

/// `functions.invoke("r2Upload", FormData)`
pub async fn upload_file(file: &web_sys::File) -> Result<UploadResponse, String> {
    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_error)?;
    http::post_form(&format!("/api/functions/{}", FN_R2_UPLOAD), form).await
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
