use contracts::domain::a001_country::aggregate::Country;

use super::http;

pub async fn list() -> Result<Vec<Country>, String> {
    http::get_json("/api/countries").await
}

pub async fn create(country: &Country) -> Result<Country, String> {
    http::post_json("/api/countries", country).await
}

pub async fn update(country: &Country) -> Result<Country, String> {
    http::put_json(&format!("/api/countries/{}", country.meta.id), country).await
}
