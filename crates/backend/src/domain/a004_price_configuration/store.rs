use async_trait::async_trait;
use contracts::domain::a004_price_configuration::aggregate::PriceConfiguration;
use contracts::domain::common::{EntityRecord, RecordMeta};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::Value;
use uuid::Uuid;

use super::repository::{self, Model};
use crate::domain::entity_store::store::{parse_record, parse_timestamp, EntityStore};
use crate::shared::error::ServiceError;

const SCOPE_CONFLICT: &str = "Price configuration for this city and service type";

pub struct PriceConfigurationStore;

fn conflict() -> anyhow::Error {
    ServiceError::Conflict(SCOPE_CONFLICT.to_string()).into()
}

/// Нарушение уникального индекса; проверка до записи может проиграть гонку
fn map_write_error(err: DbErr) -> anyhow::Error {
    if err.to_string().contains("UNIQUE constraint failed") {
        conflict()
    } else {
        err.into()
    }
}

fn to_model(record: &PriceConfiguration, data: String, created_date: String) -> Model {
    Model {
        id: record.meta.id.to_string(),
        country_id: record.country_id.to_string(),
        city_id: record.city_id.to_string(),
        service_type_id: record.service_type_id.to_string(),
        data,
        created_date,
        updated_date: record.meta.updated_date.to_rfc3339(),
    }
}

#[async_trait]
impl EntityStore for PriceConfigurationStore {
    fn entity(&self) -> &'static str {
        PriceConfiguration::collection_name()
    }

    fn element_name(&self) -> &'static str {
        PriceConfiguration::element_name()
    }

    async fn list(&self, db: &DatabaseConnection) -> anyhow::Result<Vec<Value>> {
        repository::list_all(db)
            .await?
            .into_iter()
            .map(|m| serde_json::from_str::<Value>(&m.data).map_err(anyhow::Error::from))
            .collect()
    }

    async fn get(&self, db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Value>> {
        match repository::get_by_id(db, id).await? {
            Some(m) => Ok(Some(serde_json::from_str(&m.data)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, db: &DatabaseConnection, data: Value) -> anyhow::Result<Value> {
        let meta = RecordMeta::new();
        let record: PriceConfiguration = parse_record(data, &meta)?;

        if repository::find_by_scope(db, record.city_id, record.service_type_id)
            .await?
            .is_some()
        {
            return Err(conflict());
        }

        let value = serde_json::to_value(&record)?;
        let model = to_model(&record, value.to_string(), meta.created_date.to_rfc3339());
        repository::insert(db, model).await.map_err(map_write_error)?;

        tracing::info!(
            "Created price configuration {} (city {}, service type {})",
            meta.id,
            record.city_id,
            record.service_type_id
        );
        Ok(value)
    }

    async fn update(
        &self,
        db: &DatabaseConnection,
        id: Uuid,
        data: Value,
    ) -> anyhow::Result<Value> {
        let existing = repository::get_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PriceConfiguration::element_name().into()))?;

        let mut meta = RecordMeta::at(id, parse_timestamp(&existing.created_date)?);
        meta.touch();
        let record: PriceConfiguration = parse_record(data, &meta)?;

        if let Some(other) =
            repository::find_by_scope(db, record.city_id, record.service_type_id).await?
        {
            if other.id != existing.id {
                return Err(conflict());
            }
        }

        let value = serde_json::to_value(&record)?;
        let model = to_model(&record, value.to_string(), existing.created_date);
        repository::update(db, model).await.map_err(map_write_error)?;
        Ok(value)
    }

    async fn delete(&self, db: &DatabaseConnection, id: Uuid) -> anyhow::Result<bool> {
        repository::delete(db, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::domain::a004_price_configuration::payload::{
        PriceConfigurationPayload, PriceDraft,
    };

    fn payload(city: Uuid, service: Uuid) -> Value {
        let draft = PriceDraft::with_defaults(Uuid::new_v4(), city, service);
        let payload = PriceConfigurationPayload::assemble(&draft).unwrap();
        serde_json::to_value(payload).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_scope_is_rejected() {
        let db = connect_in_memory().await;
        let (city, service) = (Uuid::new_v4(), Uuid::new_v4());

        PriceConfigurationStore
            .create(&db, payload(city, service))
            .await
            .unwrap();
        let err = PriceConfigurationStore
            .create(&db, payload(city, service))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // другой тип услуги в том же городе допустим
        PriceConfigurationStore
            .create(&db, payload(city, Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(PriceConfigurationStore.list(&db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_cannot_move_onto_taken_scope() {
        let db = connect_in_memory().await;
        let city = Uuid::new_v4();
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        PriceConfigurationStore
            .create(&db, payload(city, first))
            .await
            .unwrap();
        let created = PriceConfigurationStore
            .create(&db, payload(city, second))
            .await
            .unwrap();
        let id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();

        let err = PriceConfigurationStore
            .update(&db, id, payload(city, first))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // запись в своём же scope обновляется
        let mut same = payload(city, second);
        same["base_price"] = serde_json::json!(9.5);
        let updated = PriceConfigurationStore.update(&db, id, same).await.unwrap();
        assert_eq!(updated["base_price"], 9.5);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_validation_error() {
        let db = connect_in_memory().await;
        let mut bad = payload(Uuid::new_v4(), Uuid::new_v4());
        bad.as_object_mut().unwrap().remove("city_id");
        let err = PriceConfigurationStore.create(&db, bad).await.unwrap_err();
        assert!(matches!(
            err.downcast::<ServiceError>().unwrap(),
            ServiceError::Validation(_)
        ));
    }
}
