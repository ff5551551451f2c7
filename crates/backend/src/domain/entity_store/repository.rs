use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder, Set};
use uuid::Uuid;

/// Одна запись сущности в документном хранилище
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entity_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub entity_name: String,
    /// Запись целиком в JSON
    pub data: String,
    pub created_date: String,
    pub updated_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn list_by_entity(db: &DatabaseConnection, entity: &str) -> anyhow::Result<Vec<Model>> {
    let items = Entity::find()
        .filter(Column::EntityName.eq(entity))
        .order_by_asc(Column::CreatedDate)
        .all(db)
        .await?;
    Ok(items)
}

pub async fn get_by_id(
    db: &DatabaseConnection,
    entity: &str,
    id: Uuid,
) -> anyhow::Result<Option<Model>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::EntityName.eq(entity))
        .one(db)
        .await?;
    Ok(result)
}

pub async fn insert(db: &DatabaseConnection, model: Model) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(model.id),
        entity_name: Set(model.entity_name),
        data: Set(model.data),
        created_date: Set(model.created_date),
        updated_date: Set(model.updated_date),
    };
    active.insert(db).await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, model: Model) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(model.id),
        entity_name: Set(model.entity_name),
        data: Set(model.data),
        updated_date: Set(model.updated_date),
        created_date: sea_orm::ActiveValue::NotSet,
    };
    active.update(db).await?;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, entity: &str, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::EntityName.eq(entity))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
