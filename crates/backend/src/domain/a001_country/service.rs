use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a001_country::catalog::CountryInfo;
use contracts::system::functions::SyncCountriesResponse;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::domain::entity_store::store::{DocumentStore, EntityStore};

fn store() -> DocumentStore<Country> {
    DocumentStore::unique_on("code")
}

/// `countries.list`: по алфавиту
pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Country>> {
    let mut items = store().list_typed(db).await?;
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

pub async fn create(db: &DatabaseConnection, data: Value) -> anyhow::Result<Value> {
    store().create(db, data).await
}

pub async fn update(db: &DatabaseConnection, id: uuid::Uuid, data: Value) -> anyhow::Result<Value> {
    store().update(db, id, data).await
}

/// Добавить или обновить страны из каталога; ключ — ISO-код
pub async fn upsert_catalog(
    db: &DatabaseConnection,
    catalog: &[CountryInfo],
) -> anyhow::Result<SyncCountriesResponse> {
    let store = store();
    let mut existing = store.list_typed(db).await?;
    let mut result = SyncCountriesResponse::default();

    for info in catalog {
        // строки каталога без кода страны не сохраняются
        if info.code.trim().len() != 2 {
            continue;
        }
        match existing
            .iter_mut()
            .find(|c| c.code.eq_ignore_ascii_case(&info.code))
        {
            Some(country) => {
                let mut updated = country.clone();
                updated.apply_catalog(info);
                if updated != *country {
                    *country = store.update_typed(db, updated).await?;
                    result.updated += 1;
                }
            }
            None => {
                let created = store
                    .create_typed(db, Country::from_catalog(info))
                    .await?;
                existing.push(created);
                result.created += 1;
            }
        }
    }

    tracing::info!(
        "Country sync: {} created, {} updated",
        result.created,
        result.updated
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::domain::a001_country::catalog::fallback_countries;

    #[tokio::test]
    async fn test_upsert_catalog_is_idempotent() {
        let db = connect_in_memory().await;
        let catalog = fallback_countries();

        let first = upsert_catalog(&db, &catalog).await.unwrap();
        assert_eq!(first.created, catalog.len());
        assert_eq!(first.updated, 0);

        let second = upsert_catalog(&db, &catalog).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.updated, 0);

        let listed = list_all(&db).await.unwrap();
        assert_eq!(listed.len(), catalog.len());
        assert_eq!(listed[0].name, "Argentina");
    }

    #[tokio::test]
    async fn test_upsert_updates_changed_fields() {
        let db = connect_in_memory().await;
        let mut catalog = vec![fallback_countries().remove(0)];
        upsert_catalog(&db, &catalog).await.unwrap();

        catalog[0].phone_code = "+999".into();
        let result = upsert_catalog(&db, &catalog).await.unwrap();
        assert_eq!(result.updated, 1);
        assert_eq!(list_all(&db).await.unwrap()[0].phone_code, "+999");
    }
}
