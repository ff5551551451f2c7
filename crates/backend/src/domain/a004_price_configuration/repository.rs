use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder, Set};
use uuid::Uuid;

/// Тарифы хранятся в отдельной таблице: уникальный индекс по (city_id, service_type_id)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a004_price_configuration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub country_id: String,
    pub city_id: String,
    pub service_type_id: String,
    /// Конфигурация целиком, включая вложенные списки
    pub data: String,
    pub created_date: String,
    pub updated_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Model>> {
    let items = Entity::find()
        .order_by_asc(Column::CreatedDate)
        .all(db)
        .await?;
    Ok(items)
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?)
}

pub async fn find_by_scope(
    db: &DatabaseConnection,
    city_id: Uuid,
    service_type_id: Uuid,
) -> anyhow::Result<Option<Model>> {
    let result = Entity::find()
        .filter(Column::CityId.eq(city_id.to_string()))
        .filter(Column::ServiceTypeId.eq(service_type_id.to_string()))
        .one(db)
        .await?;
    Ok(result)
}

pub async fn insert(db: &DatabaseConnection, model: Model) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: Set(model.id),
        country_id: Set(model.country_id),
        city_id: Set(model.city_id),
        service_type_id: Set(model.service_type_id),
        data: Set(model.data),
        created_date: Set(model.created_date),
        updated_date: Set(model.updated_date),
    };
    active.insert(db).await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, model: Model) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: Set(model.id),
        country_id: Set(model.country_id),
        city_id: Set(model.city_id),
        service_type_id: Set(model.service_type_id),
        data: Set(model.data),
        updated_date: Set(model.updated_date),
        created_date: sea_orm::ActiveValue::NotSet,
    };
    active.update(db).await?;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
