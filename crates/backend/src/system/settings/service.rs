use anyhow::Result;
use chrono::Utc;
use contracts::system::settings::{AppSettings, AppearanceSettings, ConfigStatus, IntegrationSettings};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;

use super::repository;
use crate::shared::error::ServiceError;

const APPEARANCE_KEY: &str = "app_appearance";
const INTEGRATIONS_KEY: &str = "app_integrations";

async fn load<T: DeserializeOwned + Default>(db: &DatabaseConnection, key: &str) -> Result<T> {
    match repository::get(db, key).await? {
        Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Stored setting '{}' is unreadable, using defaults: {}", key, e);
            T::default()
        })),
        None => Ok(T::default()),
    }
}

async fn load_all(db: &DatabaseConnection) -> Result<AppSettings> {
    Ok(AppSettings {
        appearance: load::<AppearanceSettings>(db, APPEARANCE_KEY).await?,
        integrations: load::<IntegrationSettings>(db, INTEGRATIONS_KEY).await?,
    })
}

/// `settings.get`: секреты маскируются
pub async fn get(db: &DatabaseConnection) -> Result<AppSettings> {
    let mut settings = load_all(db).await?;
    settings.integrations = settings.integrations.masked();
    Ok(settings)
}

/// `settings.update`: оформление заменяется, ключи интеграций сливаются
pub async fn update(db: &DatabaseConnection, incoming: AppSettings) -> Result<AppSettings> {
    incoming
        .appearance
        .validate()
        .map_err(ServiceError::Validation)?;

    let mut current = load_all(db).await?;
    current.appearance = incoming.appearance;
    current.integrations.merge(incoming.integrations);

    repository::set(
        db,
        APPEARANCE_KEY,
        &serde_json::to_string(&current.appearance)?,
        "Branding and theme",
    )
    .await?;
    repository::set(
        db,
        INTEGRATIONS_KEY,
        &serde_json::to_string(&current.integrations)?,
        "Third-party integration credentials",
    )
    .await?;

    tracing::info!("Application settings updated");
    current.integrations = current.integrations.masked();
    Ok(current)
}

/// `settings.getConfigStatus`
pub async fn config_status(db: &DatabaseConnection) -> Result<ConfigStatus> {
    let integrations = load::<IntegrationSettings>(db, INTEGRATIONS_KEY).await?;
    Ok(ConfigStatus::from_settings(
        &integrations,
        Utc::now().to_rfc3339(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let db = connect_in_memory().await;
        let settings = get(&db).await.unwrap();
        assert_eq!(settings.appearance.app_name, "JoltCab");
        assert_eq!(config_status(&db).await.unwrap().configured_count(), 0);
    }

    #[tokio::test]
    async fn test_update_masks_and_keeps_secrets() {
        let db = connect_in_memory().await;
        let mut incoming = AppSettings::default();
        incoming.integrations.google_maps_api_key = Some("AIzaSyExample1234".into());
        let saved = update(&db, incoming).await.unwrap();
        let masked = saved.integrations.google_maps_api_key.clone().unwrap();
        assert!(masked.ends_with("1234") && !masked.contains("AIza"));

        // клиент присылает обратно маску: секрет не должен измениться
        update(&db, saved).await.unwrap();
        let status = config_status(&db).await.unwrap();
        assert_eq!(status.configured_count(), 1);
        let raw = repository::get(&db, INTEGRATIONS_KEY).await.unwrap().unwrap();
        assert!(raw.contains("AIzaSyExample1234"));
    }

    #[tokio::test]
    async fn test_invalid_appearance_rejected() {
        let db = connect_in_memory().await;
        let mut incoming = AppSettings::default();
        incoming.appearance.primary_color = "red".into();
        assert!(update(&db, incoming).await.is_err());
    }
}
