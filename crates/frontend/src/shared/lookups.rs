//! Справочники для подписей в таблицах и списков выбора в формах

use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a002_city::aggregate::City;
use contracts::domain::a003_service_type::aggregate::ServiceType;
use contracts::domain::a005_zone::aggregate::Zone;
use contracts::domain::a007_role::aggregate::Role;
use contracts::domain::common::EntityRecord;
use contracts::shared::list_query::ListParams;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::shared::api::{countries, entities::EntityApi};
use crate::shared::query_cache::use_query_cache;

pub const NONE_LABEL: &str = "—";

#[derive(Clone, Default)]
pub struct Lookups {
    pub countries: Vec<Country>,
    pub cities: Vec<City>,
    pub service_types: Vec<ServiceType>,
    pub zones: Vec<Zone>,
    pub roles: Vec<Role>,
}

impl Lookups {
    pub fn country_name(&self, id: Uuid) -> String {
        self.countries
            .iter()
            .find(|c| c.meta.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| NONE_LABEL.to_string())
    }

    pub fn city_name(&self, id: Option<Uuid>) -> String {
        id.and_then(|id| self.cities.iter().find(|c| c.meta.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| NONE_LABEL.to_string())
    }

    pub fn service_type_name(&self, id: Option<Uuid>) -> String {
        id.and_then(|id| self.service_types.iter().find(|s| s.meta.id == id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| NONE_LABEL.to_string())
    }

    pub fn zone_name(&self, id: Uuid) -> String {
        self.zones
            .iter()
            .find(|z| z.meta.id == id)
            .map(|z| z.name.clone())
            .unwrap_or_else(|| NONE_LABEL.to_string())
    }

    pub fn role_name(&self, id: Option<&str>) -> String {
        id.and_then(|id| self.roles.iter().find(|r| r.meta.id.to_string() == id))
            .map(|r| r.name.clone())
            .unwrap_or_else(|| NONE_LABEL.to_string())
    }

    /// Страна города (для записи тарифа)
    pub fn country_of_city(&self, city_id: Uuid) -> Option<Uuid> {
        self.cities
            .iter()
            .find(|c| c.meta.id == city_id)
            .map(|c| c.country_id)
    }

    pub fn country_options(&self) -> Vec<(String, String)> {
        self.countries
            .iter()
            .map(|c| (c.meta.id.to_string(), c.name.clone()))
            .collect()
    }

    pub fn city_options(&self) -> Vec<(String, String)> {
        self.cities
            .iter()
            .map(|c| (c.meta.id.to_string(), c.name.clone()))
            .collect()
    }

    pub fn service_type_options(&self) -> Vec<(String, String)> {
        self.service_types
            .iter()
            .map(|s| (s.meta.id.to_string(), s.name.clone()))
            .collect()
    }

    pub fn zone_options(&self) -> Vec<(String, String)> {
        self.zones
            .iter()
            .map(|z| (z.meta.id.to_string(), z.name.clone()))
            .collect()
    }

    pub fn airport_options(&self) -> Vec<(String, String)> {
        self.zones
            .iter()
            .filter(|z| z.is_airport())
            .map(|z| (z.meta.id.to_string(), z.name.clone()))
            .collect()
    }

    pub fn role_options(&self) -> Vec<(String, String)> {
        self.roles
            .iter()
            .map(|r| (r.meta.id.to_string(), r.name.clone()))
            .collect()
    }
}

/// Справочники экрана; перезагружаются при инвалидации своих ключей
pub fn use_lookups() -> RwSignal<Lookups> {
    let cache = use_query_cache();
    let lookups = RwSignal::new(Lookups::default());

    Effect::new(move |_| {
        cache.version(&Country::query_key());
        spawn_local(async move {
            match countries::list().await {
                Ok(list) => lookups.update(|l| l.countries = list),
                Err(e) => log::warn!("Failed to load countries: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        cache.version(&City::query_key());
        spawn_local(async move {
            match EntityApi::<City>::new().list(&ListParams::sorted("name")).await {
                Ok(list) => lookups.update(|l| l.cities = list),
                Err(e) => log::warn!("Failed to load cities: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        cache.version(&ServiceType::query_key());
        spawn_local(async move {
            match EntityApi::<ServiceType>::new().list(&ListParams::sorted("sort_order")).await {
                Ok(list) => lookups.update(|l| l.service_types = list),
                Err(e) => log::warn!("Failed to load service types: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        cache.version(&Zone::query_key());
        spawn_local(async move {
            match EntityApi::<Zone>::new().list(&ListParams::sorted("name")).await {
                Ok(list) => lookups.update(|l| l.zones = list),
                Err(e) => log::warn!("Failed to load zones: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        cache.version(&Role::query_key());
        spawn_local(async move {
            match EntityApi::<Role>::new().list(&ListParams::sorted("name")).await {
                Ok(list) => lookups.update(|l| l.roles = list),
                Err(e) => log::warn!("Failed to load roles: {}", e),
            }
        });
    });

    lookups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_fall_back_to_dash() {
        let city = City::new_for_insert("Lisbon".into(), Uuid::new_v4());
        let lookups = Lookups {
            cities: vec![city.clone()],
            ..Default::default()
        };
        assert_eq!(lookups.city_name(Some(city.meta.id)), "Lisbon");
        assert_eq!(lookups.city_name(None), NONE_LABEL);
        assert_eq!(lookups.country_of_city(city.meta.id), Some(city.country_id));
        assert_eq!(lookups.service_type_name(Some(Uuid::new_v4())), NONE_LABEL);
    }
}
