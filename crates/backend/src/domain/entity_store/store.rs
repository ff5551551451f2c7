use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::common::{EntityRecord, RecordMeta};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::marker::PhantomData;
use uuid::Uuid;

use super::repository;
use crate::shared::error::ServiceError;

/// Хранилище одной сущности, доступной через `/api/entities/{entity}`
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Имя коллекции в URL
    fn entity(&self) -> &'static str;

    fn element_name(&self) -> &'static str;

    async fn list(&self, db: &DatabaseConnection) -> anyhow::Result<Vec<Value>>;

    async fn get(&self, db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Value>>;

    async fn create(&self, db: &DatabaseConnection, data: Value) -> anyhow::Result<Value>;

    async fn update(&self, db: &DatabaseConnection, id: Uuid, data: Value)
        -> anyhow::Result<Value>;

    async fn delete(&self, db: &DatabaseConnection, id: Uuid) -> anyhow::Result<bool>;
}

/// Разобрать тело запроса в типизированную запись
///
/// Служебные поля `id`, `created_date`, `updated_date` всегда берутся из `meta`,
/// присланные клиентом значения игнорируются. Отсутствие обязательного поля
/// или неверный тип дают `ServiceError::Validation`.
pub fn parse_record<T: EntityRecord>(data: Value, meta: &RecordMeta) -> anyhow::Result<T> {
    let Value::Object(mut map) = data else {
        return Err(ServiceError::Validation(format!(
            "{} must be a JSON object",
            T::element_name()
        ))
        .into());
    };
    map.insert("id".into(), json!(meta.id));
    map.insert("created_date".into(), json!(meta.created_date));
    map.insert("updated_date".into(), json!(meta.updated_date));

    let record: T = serde_json::from_value(Value::Object(map)).map_err(|e| {
        ServiceError::Validation(format!("Invalid {}: {}", T::element_name(), e))
    })?;
    record.validate().map_err(ServiceError::Validation)?;
    Ok(record)
}

pub fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

/// Сущность в общей таблице `entity_records`
///
/// `unique_field` (например, `code` у стран) проверяется без учёта регистра
/// перед каждой записью.
pub struct DocumentStore<T> {
    unique_field: Option<&'static str>,
    _record: PhantomData<fn() -> T>,
}

impl<T: EntityRecord> DocumentStore<T> {
    pub fn new() -> Self {
        Self {
            unique_field: None,
            _record: PhantomData,
        }
    }

    pub fn unique_on(field: &'static str) -> Self {
        Self {
            unique_field: Some(field),
            _record: PhantomData,
        }
    }

    /// Все записи в типизированном виде
    pub async fn list_typed(&self, db: &DatabaseConnection) -> anyhow::Result<Vec<T>> {
        repository::list_by_entity(db, T::collection_name())
            .await?
            .into_iter()
            .map(|m| serde_json::from_str::<T>(&m.data).map_err(anyhow::Error::from))
            .collect()
    }

    pub async fn create_typed(&self, db: &DatabaseConnection, record: T) -> anyhow::Result<T> {
        let data = serde_json::to_value(&record)?;
        let created = self.create(db, data).await?;
        Ok(serde_json::from_value(created)?)
    }

    pub async fn update_typed(&self, db: &DatabaseConnection, record: T) -> anyhow::Result<T> {
        let id = record.id();
        let data = serde_json::to_value(&record)?;
        let updated = self.update(db, id, data).await?;
        Ok(serde_json::from_value(updated)?)
    }

    async fn ensure_unique(
        &self,
        db: &DatabaseConnection,
        record: &Value,
        own_id: Uuid,
    ) -> anyhow::Result<()> {
        let Some(field) = self.unique_field else {
            return Ok(());
        };
        let Some(wanted) = record.get(field).and_then(Value::as_str) else {
            return Ok(());
        };

        let own_id = own_id.to_string();
        for model in repository::list_by_entity(db, T::collection_name()).await? {
            if model.id == own_id {
                continue;
            }
            let other: Value = serde_json::from_str(&model.data)?;
            let taken = other
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|v| v.eq_ignore_ascii_case(wanted));
            if taken {
                return Err(ServiceError::Conflict(format!(
                    "{} with {} '{}'",
                    T::element_name(),
                    field,
                    wanted
                ))
                .into());
            }
        }
        Ok(())
    }
}

impl<T: EntityRecord> Default for DocumentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: EntityRecord> EntityStore for DocumentStore<T> {
    fn entity(&self) -> &'static str {
        T::collection_name()
    }

    fn element_name(&self) -> &'static str {
        T::element_name()
    }

    async fn list(&self, db: &DatabaseConnection) -> anyhow::Result<Vec<Value>> {
        repository::list_by_entity(db, T::collection_name())
            .await?
            .into_iter()
            .map(|m| serde_json::from_str::<Value>(&m.data).map_err(anyhow::Error::from))
            .collect()
    }

    async fn get(&self, db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Value>> {
        match repository::get_by_id(db, T::collection_name(), id).await? {
            Some(m) => Ok(Some(serde_json::from_str(&m.data)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, db: &DatabaseConnection, data: Value) -> anyhow::Result<Value> {
        let meta = RecordMeta::new();
        let record: T = parse_record(data, &meta)?;
        let value = serde_json::to_value(&record)?;
        self.ensure_unique(db, &value, meta.id).await?;

        repository::insert(
            db,
            repository::Model {
                id: meta.id.to_string(),
                entity_name: T::collection_name().to_string(),
                data: value.to_string(),
                created_date: meta.created_date.to_rfc3339(),
                updated_date: meta.updated_date.to_rfc3339(),
            },
        )
        .await?;

        tracing::info!("Created {} {}", T::collection_name(), meta.id);
        Ok(value)
    }

    async fn update(
        &self,
        db: &DatabaseConnection,
        id: Uuid,
        data: Value,
    ) -> anyhow::Result<Value> {
        let existing = repository::get_by_id(db, T::collection_name(), id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(T::element_name().to_string()))?;

        let mut meta = RecordMeta::at(id, parse_timestamp(&existing.created_date)?);
        meta.touch();
        let record: T = parse_record(data, &meta)?;
        let value = serde_json::to_value(&record)?;
        self.ensure_unique(db, &value, id).await?;

        repository::update(
            db,
            repository::Model {
                id: id.to_string(),
                entity_name: T::collection_name().to_string(),
                data: value.to_string(),
                created_date: existing.created_date,
                updated_date: meta.updated_date.to_rfc3339(),
            },
        )
        .await?;

        Ok(value)
    }

    async fn delete(&self, db: &DatabaseConnection, id: Uuid) -> anyhow::Result<bool> {
        repository::delete(db, T::collection_name(), id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::domain::a001_country::aggregate::Country;

    fn country(name: &str, code: &str) -> Value {
        json!({ "name": name, "code": code, "currency_code": "USD" })
    }

    #[test]
    fn test_parse_record_overrides_meta_and_fails_fast() {
        let meta = RecordMeta::new();
        let mut data = country("Kenya", "KE");
        data["id"] = json!("not-a-uuid");
        let parsed: Country = parse_record(data, &meta).unwrap();
        assert_eq!(parsed.meta.id, meta.id);

        let err = parse_record::<Country>(json!({ "code": "KE" }), &meta).unwrap_err();
        let err = err.downcast::<ServiceError>().unwrap();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let db = connect_in_memory().await;
        let store = DocumentStore::<Country>::new();

        let created = store.create(&db, country("Kenya", "KE")).await.unwrap();
        let id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();
        assert_eq!(store.list(&db).await.unwrap().len(), 1);

        let updated = store
            .update(&db, id, country("Republic of Kenya", "KE"))
            .await
            .unwrap();
        assert_eq!(updated["name"], "Republic of Kenya");
        assert_eq!(updated["created_date"], created["created_date"]);

        assert!(store.delete(&db, id).await.unwrap());
        assert!(!store.delete(&db, id).await.unwrap());
        assert!(store.get(&db, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = connect_in_memory().await;
        let store = DocumentStore::<Country>::new();
        let err = store
            .update(&db, Uuid::new_v4(), country("Peru", "PE"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast::<ServiceError>().unwrap(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_unique_field_rejects_duplicates() {
        let db = connect_in_memory().await;
        let store = DocumentStore::<Country>::unique_on("code");
        store.create(&db, country("Kenya", "KE")).await.unwrap();
        let err = store.create(&db, country("Kenia", "ke")).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_stores_are_isolated_per_entity() {
        use contracts::domain::a007_role::aggregate::Role;

        let db = connect_in_memory().await;
        DocumentStore::<Country>::new()
            .create(&db, country("Kenya", "KE"))
            .await
            .unwrap();
        let roles = DocumentStore::<Role>::new();
        assert!(roles.list(&db).await.unwrap().is_empty());
    }
}
