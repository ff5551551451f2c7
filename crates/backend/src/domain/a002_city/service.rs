use contracts::domain::a002_city::aggregate::City;
use contracts::system::functions::GeocodeResult;
use sea_orm::DatabaseConnection;

use crate::domain::entity_store::store::DocumentStore;

/// `functions.invoke("geocode")`: сохранённые города с координатами,
/// имя которых содержит запрос (без учёта регистра)
pub async fn geocode(db: &DatabaseConnection, query: &str) -> anyhow::Result<Vec<GeocodeResult>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(Vec::new());
    }

    let cities = DocumentStore::<City>::new().list_typed(db).await?;
    let mut results: Vec<GeocodeResult> = cities
        .into_iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .filter_map(|c| match (c.latitude, c.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeocodeResult {
                name: c.name,
                latitude,
                longitude,
            }),
            _ => None,
        })
        .collect();
    results.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity_store::store::EntityStore;
    use crate::shared::data::db::connect_in_memory;
    use serde_json::json;

    #[tokio::test]
    async fn test_geocode_matches_stored_cities() {
        let db = connect_in_memory().await;
        let store = DocumentStore::<City>::new();
        let country_id = uuid::Uuid::new_v4();
        for (name, lat) in [("Miami", Some(25.76)), ("Miami Beach", Some(25.79)), ("Miami Gardens", None)] {
            let mut data = json!({ "name": name, "country_id": country_id, "is_active": true });
            if let Some(lat) = lat {
                data["latitude"] = json!(lat);
                data["longitude"] = json!(-80.19);
            }
            store.create(&db, data).await.unwrap();
        }

        let results = geocode(&db, "miami").await.unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Miami", "Miami Beach"]);

        assert!(geocode(&db, "Lisbon").await.unwrap().is_empty());
        assert!(geocode(&db, "  ").await.unwrap().is_empty());
    }
}
