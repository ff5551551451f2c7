use contracts::domain::a007_role::aggregate::{default_roles, Role};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::entity_store::store::{DocumentStore, EntityStore};
use crate::shared::error::ServiceError;

pub fn store() -> DocumentStore<Role> {
    DocumentStore::unique_on("name")
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Role>> {
    store().list_typed(db).await
}

/// Системные роли (созданные `Role.seed`) не удаляются
pub async fn ensure_deletable(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<()> {
    let Some(value) = store().get(db, id).await? else {
        return Ok(());
    };
    let role: Role = serde_json::from_value(value)?;
    if role.is_system {
        return Err(ServiceError::Validation(format!(
            "System role '{}' cannot be deleted",
            role.name
        ))
        .into());
    }
    Ok(())
}

/// `Role.seed`: создаёт отсутствующие системные роли, существующие не трогает
pub async fn seed(db: &DatabaseConnection) -> anyhow::Result<usize> {
    let store = store();
    let existing = store.list_typed(db).await?;
    let mut created = 0;

    for role in default_roles() {
        if existing.iter().any(|r| r.name.eq_ignore_ascii_case(&role.name)) {
            continue;
        }
        store.create_typed(db, role).await?;
        created += 1;
    }

    tracing::info!("Seeded {} default roles", created);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityRecord;

    #[tokio::test]
    async fn test_seed_creates_missing_roles_once() {
        let db = crate::shared::data::db::connect_in_memory().await;
        assert_eq!(seed(&db).await.unwrap(), 4);
        assert_eq!(seed(&db).await.unwrap(), 0);
        let roles = list_all(&db).await.unwrap();
        assert!(roles.iter().all(|r| r.is_system));
    }

    #[tokio::test]
    async fn test_system_role_is_not_deletable() {
        let db = crate::shared::data::db::connect_in_memory().await;
        seed(&db).await.unwrap();
        let system = list_all(&db).await.unwrap().remove(0);
        assert!(ensure_deletable(&db, system.id()).await.is_err());

        let custom = Role::new_for_insert("Night Shift".into(), String::new(), &[]);
        let custom = store().create_typed(&db, custom).await.unwrap();
        assert!(ensure_deletable(&db, custom.id()).await.is_ok());
    }
}
