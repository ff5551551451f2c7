use anyhow::Result;
use contracts::domain::a001_country::catalog::pick_country_list;
use contracts::system::functions::SyncCountriesResponse;
use sea_orm::DatabaseConnection;

use super::restcountries_api_client::RestCountriesApiClient;
use crate::domain::a001_country::service as country_service;

/// `functions.invoke("syncCountries")`
///
/// Порядок источников: restcountries v3, затем v2, затем встроенный список.
/// Недоступность API не считается ошибкой.
pub async fn execute(db: &DatabaseConnection) -> Result<SyncCountriesResponse> {
    let client = RestCountriesApiClient::new()?;

    let v3 = client.fetch_v3().await;
    if let Err(e) = &v3 {
        tracing::warn!("restcountries v3 unavailable: {:#}", e);
    }
    let v2 = match &v3 {
        Ok(list) if !list.is_empty() => Err("not requested".to_string()),
        _ => client.fetch_v2().await.map_err(|e| {
            tracing::warn!("restcountries v2 unavailable: {:#}", e);
            e.to_string()
        }),
    };

    let catalog = pick_country_list([v3.map_err(|e| e.to_string()), v2]);
    tracing::info!("Syncing {} countries", catalog.len());
    country_service::upsert_catalog(db, &catalog).await
}
