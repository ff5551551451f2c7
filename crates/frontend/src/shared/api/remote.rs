//! Сторонние публичные API, вызываемые прямо из браузера

use contracts::domain::a001_country::catalog::{
    parse_restcountries_v2, parse_restcountries_v3, pick_country_list,
    CountryInfo, RESTCOUNTRIES_V2_URL, RESTCOUNTRIES_V3_URL,
};
use contracts::system::functions::{parse_nominatim, GeocodeResult, NOMINATIM_LIMIT, NOMINATIM_SEARCH_URL};
use gloo_net::http::Request;

async fn fetch_text(url: &str) -> Result<String, String> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    if !response.ok() {
        return Err(format!("Request failed: {}", response.status()));
    }
    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}

/// Список стран для выбора: v3.1, затем v2, затем встроенный список
///
/// Никогда не возвращает ошибку: сбои только пишутся в консоль.
pub async fn load_country_catalog() -> Vec<CountryInfo> {
    let v3 = match fetch_text(RESTCOUNTRIES_V3_URL).await {
        Ok(body) => parse_restcountries_v3(&body),
        Err(e) => Err(e),
    };
    match &v3 {
        Ok(list) if !list.is_empty() => {}
        Ok(_) => log::warn!("restcountries v3 returned no countries"),
        Err(e) => log::warn!("restcountries v3 failed: {}", e),
    }
    if v3.as_ref().is_ok_and(|list| !list.is_empty()) {
        return pick_country_list([v3]);
    }

    let v2 = match fetch_text(RESTCOUNTRIES_V2_URL).await {
        Ok(body) => parse_restcountries_v2(&body),
        Err(e) => Err(e),
    };
    if let Err(e) = &v2 {
        log::warn!("restcountries v2 failed, using built-in list: {}", e);
    }
    pick_country_list([v3, v2])
}

/// Резервный геокодер nominatim
pub async fn nominatim_search(query: &str) -> Result<Vec<GeocodeResult>, String> {
    let url = format!(
        "{}?format=json&limit={}&q={}",
        NOMINATIM_SEARCH_URL,
        NOMINATIM_LIMIT,
        urlencoding::encode(query)
    );
    let body = fetch_text(&url).await?;
    parse_nominatim(&body)
}
