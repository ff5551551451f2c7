//! Операции `entities.<Name>.*` поверх реестра хранилищ.

use contracts::domain::a007_role::aggregate::Role;
use contracts::domain::common::EntityRecord;
use contracts::shared::list_query::{apply_list_params, matches_filter, ListParams};
use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::registry;
use super::store::EntityStore;
use crate::domain::a007_role;
use crate::shared::error::ServiceError;

pub fn resolve(entity: &str) -> anyhow::Result<Box<dyn EntityStore>> {
    registry::store_for(entity)
        .ok_or_else(|| ServiceError::NotFound(format!("Entity '{}'", entity)).into())
}

pub fn parse_id(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::Validation(format!("Invalid id: {}", raw)).into())
}

pub async fn list(
    db: &DatabaseConnection,
    entity: &str,
    params: &ListParams,
) -> anyhow::Result<Vec<Value>> {
    let store = resolve(entity)?;
    let records = store.list(db).await?;
    Ok(apply_list_params(records, params))
}

/// Точное совпадение по всем полям запроса, затем сортировка и лимит
pub async fn filter(
    db: &DatabaseConnection,
    entity: &str,
    query: &Map<String, Value>,
    params: &ListParams,
) -> anyhow::Result<Vec<Value>> {
    let store = resolve(entity)?;
    let records = store
        .list(db)
        .await?
        .into_iter()
        .filter(|r| matches_filter(r, query))
        .collect();
    Ok(apply_list_params(records, params))
}

pub async fn get(db: &DatabaseConnection, entity: &str, id: &str) -> anyhow::Result<Value> {
    let store = resolve(entity)?;
    let id = parse_id(id)?;
    store
        .get(db, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(store.element_name().to_string()).into())
}

pub async fn create(db: &DatabaseConnection, entity: &str, data: Value) -> anyhow::Result<Value> {
    resolve(entity)?.create(db, data).await
}

pub async fn update(
    db: &DatabaseConnection,
    entity: &str,
    id: &str,
    data: Value,
) -> anyhow::Result<Value> {
    let store = resolve(entity)?;
    store.update(db, parse_id(id)?, data).await
}

pub async fn delete(db: &DatabaseConnection, entity: &str, id: &str) -> anyhow::Result<()> {
    let store = resolve(entity)?;
    let id = parse_id(id)?;
    if entity == Role::collection_name() {
        a007_role::service::ensure_deletable(db, id).await?;
    }
    if store.delete(db, id).await? {
        tracing::info!("Deleted {} {}", entity, id);
        Ok(())
    } else {
        Err(ServiceError::NotFound(store.element_name().to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use serde_json::json;

    async fn seed_cities(db: &DatabaseConnection) -> Uuid {
        let country = create(db, "country", json!({ "name": "Kenya", "code": "KE" }))
            .await
            .unwrap();
        let country_id = country["id"].as_str().unwrap().to_string();
        for (name, active) in [("Nairobi", true), ("Mombasa", false), ("Kisumu", true)] {
            create(
                db,
                "city",
                json!({ "name": name, "country_id": country_id, "is_active": active }),
            )
            .await
            .unwrap();
        }
        Uuid::parse_str(&country_id).unwrap()
    }

    #[tokio::test]
    async fn test_list_sort_and_limit() {
        let db = connect_in_memory().await;
        seed_cities(&db).await;

        let all = list(&db, "city", &ListParams::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let sorted = list(&db, "city", &ListParams::sorted("-name").with_limit(2))
            .await
            .unwrap();
        let names: Vec<&str> = sorted.iter().map(|c| c["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Nairobi", "Mombasa"]);
    }

    #[tokio::test]
    async fn test_filter_exact_match() {
        let db = connect_in_memory().await;
        let country_id = seed_cities(&db).await;

        let mut query = Map::new();
        query.insert("is_active".into(), json!(true));
        query.insert("country_id".into(), json!(country_id));
        let active = filter(&db, "city", &query, &ListParams::sorted("name"))
            .await
            .unwrap();
        let names: Vec<&str> = active.iter().map(|c| c["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Kisumu", "Nairobi"]);
    }

    #[tokio::test]
    async fn test_unknown_entity_and_bad_id() {
        let db = connect_in_memory().await;
        let err = list(&db, "spaceship", &ListParams::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast::<ServiceError>().unwrap(),
            ServiceError::NotFound(_)
        ));

        let err = get(&db, "city", "42").await.unwrap_err();
        assert!(matches!(
            err.downcast::<ServiceError>().unwrap(),
            ServiceError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let db = connect_in_memory().await;
        let created = create(&db, "country", json!({ "name": "Peru", "code": "PE" }))
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap();
        delete(&db, "country", id).await.unwrap();
        assert!(delete(&db, "country", id).await.is_err());
        assert!(get(&db, "country", id).await.is_err());
    }
}
