//! Серверные функции `functions.invoke(name, payload)`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FN_GEOCODE: &str = "geocode";
pub const FN_R2_UPLOAD: &str = "r2Upload";
pub const FN_SYNC_COUNTRIES: &str = "syncCountries";

/// Резервный геокодер, если `geocode` ничего не нашёл
pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const NOMINATIM_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// Ответ nominatim: координаты приходят строками
pub fn parse_nominatim(body: &str) -> Result<Vec<GeocodeResult>, String> {
    let items: Vec<Value> =
        serde_json::from_str(body).map_err(|e| format!("Invalid geocoder response: {}", e))?;

    Ok(items
        .iter()
        .filter_map(|item| {
            let coord = |key: &str| -> Option<f64> {
                match item.get(key)? {
                    Value::String(s) => s.parse().ok(),
                    Value::Number(n) => n.as_f64(),
                    _ => None,
                }
            };
            Some(GeocodeResult {
                name: item.get("display_name")?.as_str()?.to_string(),
                latitude: coord("lat")?,
                longitude: coord("lon")?,
            })
        })
        .take(NOMINATIM_LIMIT)
        .collect())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncCountriesResponse {
    pub created: usize,
    pub updated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim() {
        let body = r#"[
            {"display_name": "Lagos, Nigeria", "lat": "6.4550575", "lon": "3.3941795"},
            {"display_name": "broken", "lat": "north"},
            {"display_name": "Ikeja", "lat": 6.6, "lon": 3.35}
        ]"#;
        let results = parse_nominatim(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Lagos, Nigeria");
        assert!((results[0].latitude - 6.4550575).abs() < 1e-9);
        assert_eq!(results[1].longitude, 3.35);
    }

    #[test]
    fn test_parse_nominatim_rejects_garbage() {
        assert!(parse_nominatim("<html>").is_err());
        assert!(parse_nominatim("[]").unwrap().is_empty());
    }
}
