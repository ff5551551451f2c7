use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::surge::{validate_surge_days, SurgeDay};
use crate::domain::common::{EntityRecord, RecordMeta};

/// Единица расстояния тарифа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Miles => "miles",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "km" => Some(DistanceUnit::Km),
            "miles" => Some(DistanceUnit::Miles),
            _ => None,
        }
    }
}

/// Скалярные ставки тарифа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRates {
    /// Доля водителя, %
    pub provider_profit: f64,
    pub min_fare: f64,
    pub base_price: f64,
    pub distance_for_base_price: f64,
    pub price_per_unit_distance: f64,
    pub price_per_unit_time: f64,
    pub waiting_time_start_after_minute: u32,
    pub price_for_waiting_time: f64,
    pub cancellation_fee: f64,
    pub tax: f64,
    pub user_tax: f64,
    pub user_miscellaneous_fee: f64,
    pub provider_tax: f64,
    pub provider_miscellaneous_fee: f64,
    pub max_space: u32,
    pub distance_unit: DistanceUnit,
}

impl Default for PriceRates {
    fn default() -> Self {
        Self {
            provider_profit: 85.0,
            min_fare: 1.75,
            base_price: 6.0,
            distance_for_base_price: 1.0,
            price_per_unit_distance: 1.25,
            price_per_unit_time: 0.3,
            waiting_time_start_after_minute: 3,
            price_for_waiting_time: 0.25,
            cancellation_fee: 5.0,
            tax: 0.0,
            user_tax: 0.0,
            user_miscellaneous_fee: 0.0,
            provider_tax: 0.0,
            provider_miscellaneous_fee: 0.0,
            max_space: 4,
            distance_unit: DistanceUnit::Km,
        }
    }
}

impl PriceRates {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.provider_profit) {
            return Err("Provider profit must be between 0 and 100".to_string());
        }
        let money = [
            ("Min fare", self.min_fare),
            ("Base price", self.base_price),
            ("Distance for base price", self.distance_for_base_price),
            ("Price per unit distance", self.price_per_unit_distance),
            ("Price per unit time", self.price_per_unit_time),
            ("Price for waiting time", self.price_for_waiting_time),
            ("Cancellation fee", self.cancellation_fee),
            ("Tax", self.tax),
            ("User tax", self.user_tax),
            ("User miscellaneous fee", self.user_miscellaneous_fee),
            ("Provider tax", self.provider_tax),
            ("Provider miscellaneous fee", self.provider_miscellaneous_fee),
        ];
        if let Some((name, _)) = money.iter().find(|(_, v)| *v < 0.0 || !v.is_finite()) {
            return Err(format!("{} cannot be negative", name));
        }
        if self.max_space == 0 {
            return Err("Max space must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Флаги, включающие необязательные разделы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFlags {
    pub business_status: bool,
    pub car_rental_business: bool,
    pub is_zone: bool,
    pub is_surge_hours: bool,
    pub ai_pricing_enabled: bool,
}

impl Default for PriceFlags {
    fn default() -> Self {
        Self {
            business_status: true,
            car_rental_business: false,
            is_zone: false,
            is_surge_hours: false,
            ai_pricing_enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneToZonePrice {
    pub from_zone_id: Uuid,
    pub to_zone_id: Uuid,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportToCityPrice {
    pub from_airport_id: Uuid,
    pub to_city_id: Uuid,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityToCityPrice {
    pub from_city_id: Uuid,
    pub to_city_id: Uuid,
    pub amount: f64,
}

/// Пакет аренды автомобиля с водителем
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalPackage {
    pub package_name: String,
    pub distance_for_base_price: f64,
    /// Часы, включённые в базовую цену
    pub time_for_base_price: f64,
    pub base_price: f64,
    pub price_per_unit_distance: f64,
    pub price_per_unit_time: f64,
    #[serde(default = "crate::domain::common::default_true")]
    pub business_status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichAreaSurge {
    pub zone_id: Uuid,
    pub surge_multiplier: f64,
}

/// Тарифная конфигурация для пары (город, тип услуги)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConfiguration {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub country_id: Uuid,
    pub city_id: Uuid,
    pub service_type_id: Uuid,
    #[serde(flatten)]
    pub rates: PriceRates,
    #[serde(flatten)]
    pub flags: PriceFlags,
    #[serde(default)]
    pub surge_times: Vec<SurgeDay>,
    #[serde(default)]
    pub zone_to_zone_prices: Vec<ZoneToZonePrice>,
    #[serde(default)]
    pub airport_to_city_prices: Vec<AirportToCityPrice>,
    #[serde(default)]
    pub city_to_city_prices: Vec<CityToCityPrice>,
    #[serde(default)]
    pub rental_packages: Vec<RentalPackage>,
    #[serde(default)]
    pub rich_area_surge: Vec<RichAreaSurge>,
}

impl PriceConfiguration {
    pub fn scope_key(&self) -> (Uuid, Uuid) {
        (self.city_id, self.service_type_id)
    }

    /// Конфигурация для пары (город, тип услуги)
    pub fn find_for(
        items: &[PriceConfiguration],
        city_id: Uuid,
        service_type_id: Uuid,
    ) -> Option<&PriceConfiguration> {
        items
            .iter()
            .filter(|c| c.scope_key() == (city_id, service_type_id))
            .max_by_key(|c| c.meta.updated_date)
    }
}

/// Одна запись на пару (город, тип услуги), самая свежая по `updated_date`
///
/// Порядок первого появления пары сохраняется.
pub fn dedupe_by_scope(items: &[PriceConfiguration]) -> Vec<&PriceConfiguration> {
    let mut order: Vec<(Uuid, Uuid)> = Vec::new();
    let mut latest: HashMap<(Uuid, Uuid), &PriceConfiguration> = HashMap::new();
    for item in items {
        let key = item.scope_key();
        match latest.get(&key) {
            Some(existing) if existing.meta.updated_date >= item.meta.updated_date => {}
            Some(_) => {
                latest.insert(key, item);
            }
            None => {
                order.push(key);
                latest.insert(key, item);
            }
        }
    }
    order.iter().filter_map(|k| latest.get(k).copied()).collect()
}

fn require_non_negative(value: f64, what: &str) -> Result<(), String> {
    if value < 0.0 || !value.is_finite() {
        return Err(format!("{} cannot be negative", what));
    }
    Ok(())
}

impl EntityRecord for PriceConfiguration {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        if self.city_id.is_nil() || self.service_type_id.is_nil() {
            return Err("Please select a city and service type".to_string());
        }
        if self.country_id.is_nil() {
            return Err("Country is required".to_string());
        }
        self.rates.validate()?;
        validate_surge_days(&self.surge_times)?;
        for p in &self.zone_to_zone_prices {
            require_non_negative(p.amount, "Zone price")?;
        }
        for p in &self.airport_to_city_prices {
            require_non_negative(p.amount, "Airport price")?;
        }
        for p in &self.city_to_city_prices {
            require_non_negative(p.amount, "City price")?;
        }
        for p in &self.rental_packages {
            if p.package_name.trim().is_empty() {
                return Err("Rental package name is required".to_string());
            }
            require_non_negative(p.base_price, "Rental base price")?;
        }
        if self.rich_area_surge.iter().any(|s| s.surge_multiplier <= 0.0) {
            return Err("Surge multiplier must be positive".to_string());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "price_configuration"
    }

    fn element_name() -> &'static str {
        "Price Configuration"
    }

    fn list_name() -> &'static str {
        "Price Configurations"
    }

    fn query_key() -> String {
        "price_configurations".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample(city: Uuid, service: Uuid) -> PriceConfiguration {
        PriceConfiguration {
            meta: RecordMeta::new(),
            country_id: Uuid::new_v4(),
            city_id: city,
            service_type_id: service,
            rates: PriceRates::default(),
            flags: PriceFlags::default(),
            surge_times: vec![],
            zone_to_zone_prices: vec![],
            airport_to_city_prices: vec![],
            city_to_city_prices: vec![],
            rental_packages: vec![],
            rich_area_surge: vec![],
        }
    }

    #[test]
    fn test_defaults() {
        let rates = PriceRates::default();
        assert_eq!(rates.provider_profit, 85.0);
        assert_eq!(rates.min_fare, 1.75);
        assert_eq!(rates.base_price, 6.0);
        assert_eq!(rates.distance_unit, DistanceUnit::Km);
        assert!(PriceFlags::default().business_status);
    }

    #[test]
    fn test_flat_wire_format() {
        let config = sample(Uuid::new_v4(), Uuid::new_v4());
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["min_fare"], 1.75);
        assert_eq!(value["distance_unit"], "km");
        assert_eq!(value["is_zone"], false);
        let back: PriceConfiguration = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_dedupe_keeps_latest_per_pair() {
        let city = Uuid::new_v4();
        let service = Uuid::new_v4();
        let older = sample(city, service);
        let mut newer = sample(city, service);
        newer.meta.updated_date = Utc::now() + Duration::minutes(5);
        newer.rates.base_price = 9.0;
        let other = sample(Uuid::new_v4(), service);

        let items = vec![older, other.clone(), newer.clone()];
        let deduped = dedupe_by_scope(&items);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].rates.base_price, 9.0);
        assert_eq!(deduped[1].meta.id, other.meta.id);
    }

    #[test]
    fn test_validate_rejects_nil_scope() {
        let config = sample(Uuid::nil(), Uuid::new_v4());
        assert_eq!(
            config.validate(),
            Err("Please select a city and service type".to_string())
        );
    }
}
