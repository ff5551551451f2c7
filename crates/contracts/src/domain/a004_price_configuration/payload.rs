//! Тело запроса create/update тарифной конфигурации.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregate::{
    AirportToCityPrice, CityToCityPrice, PriceConfiguration, PriceFlags, PriceRates,
    RentalPackage, RichAreaSurge, ZoneToZonePrice,
};
use super::surge::{validate_surge_days, SurgeDay, SurgeSchedule};
use crate::domain::common::RecordMeta;

/// Документ целиком: запись заменяет предыдущую версию полностью
///
/// Списки, зависящие от флагов, отсутствуют в JSON, если флаг выключен.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConfigurationPayload {
    pub country_id: Uuid,
    pub city_id: Uuid,
    pub service_type_id: Uuid,
    #[serde(flatten)]
    pub rates: PriceRates,
    #[serde(flatten)]
    pub flags: PriceFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surge_times: Option<Vec<SurgeDay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_to_zone_prices: Option<Vec<ZoneToZonePrice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_to_city_prices: Option<Vec<AirportToCityPrice>>,
    #[serde(default)]
    pub city_to_city_prices: Vec<CityToCityPrice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_packages: Option<Vec<RentalPackage>>,
    #[serde(default)]
    pub rich_area_surge: Vec<RichAreaSurge>,
}

/// Всё, что собрал редактор, без учёта флагов
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDraft {
    pub country_id: Uuid,
    pub city_id: Uuid,
    pub service_type_id: Uuid,
    pub rates: PriceRates,
    pub flags: PriceFlags,
    pub surge: SurgeSchedule,
    pub zone_to_zone_prices: Vec<ZoneToZonePrice>,
    pub airport_to_city_prices: Vec<AirportToCityPrice>,
    pub city_to_city_prices: Vec<CityToCityPrice>,
    pub rental_packages: Vec<RentalPackage>,
    pub rich_area_surge: Vec<RichAreaSurge>,
}

impl PriceDraft {
    pub fn with_defaults(country_id: Uuid, city_id: Uuid, service_type_id: Uuid) -> Self {
        Self {
            country_id,
            city_id,
            service_type_id,
            rates: PriceRates::default(),
            flags: PriceFlags::default(),
            surge: SurgeSchedule::new(),
            zone_to_zone_prices: Vec::new(),
            airport_to_city_prices: Vec::new(),
            city_to_city_prices: Vec::new(),
            rental_packages: Vec::new(),
            rich_area_surge: Vec::new(),
        }
    }

    pub fn from_existing(config: &PriceConfiguration) -> Self {
        Self {
            country_id: config.country_id,
            city_id: config.city_id,
            service_type_id: config.service_type_id,
            rates: config.rates.clone(),
            flags: config.flags.clone(),
            surge: SurgeSchedule::from_stored(&config.surge_times),
            zone_to_zone_prices: config.zone_to_zone_prices.clone(),
            airport_to_city_prices: config.airport_to_city_prices.clone(),
            city_to_city_prices: config.city_to_city_prices.clone(),
            rental_packages: config.rental_packages.clone(),
            rich_area_surge: config.rich_area_surge.clone(),
        }
    }
}

impl PriceConfigurationPayload {
    /// Собрать тело запроса из черновика
    ///
    /// - зоны и аэропорты только при `is_zone`
    /// - аренда только при `car_rental_business`
    /// - surge только при `is_surge_hours` и только дни с интервалами
    pub fn assemble(draft: &PriceDraft) -> Result<Self, String> {
        if draft.city_id.is_nil() || draft.service_type_id.is_nil() {
            return Err("Please select a city and service type".to_string());
        }
        draft.rates.validate()?;

        let flags = &draft.flags;
        let surge_times = if flags.is_surge_hours {
            let days = draft.surge.payload_days();
            validate_surge_days(&days)?;
            Some(days)
        } else {
            None
        };

        Ok(Self {
            country_id: draft.country_id,
            city_id: draft.city_id,
            service_type_id: draft.service_type_id,
            rates: draft.rates.clone(),
            flags: flags.clone(),
            surge_times,
            zone_to_zone_prices: flags.is_zone.then(|| draft.zone_to_zone_prices.clone()),
            airport_to_city_prices: flags
                .is_zone
                .then(|| draft.airport_to_city_prices.clone()),
            city_to_city_prices: draft.city_to_city_prices.clone(),
            rental_packages: flags
                .car_rental_business
                .then(|| draft.rental_packages.clone()),
            rich_area_surge: draft.rich_area_surge.clone(),
        })
    }

    /// Запись для хранения; отсутствующие списки становятся пустыми
    pub fn into_record(self, meta: RecordMeta) -> PriceConfiguration {
        PriceConfiguration {
            meta,
            country_id: self.country_id,
            city_id: self.city_id,
            service_type_id: self.service_type_id,
            rates: self.rates,
            flags: self.flags,
            surge_times: self.surge_times.unwrap_or_default(),
            zone_to_zone_prices: self.zone_to_zone_prices.unwrap_or_default(),
            airport_to_city_prices: self.airport_to_city_prices.unwrap_or_default(),
            city_to_city_prices: self.city_to_city_prices,
            rental_packages: self.rental_packages.unwrap_or_default(),
            rich_area_surge: self.rich_area_surge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_price_configuration::surge::{SurgeTimeDraft, Weekday};

    fn filled_draft() -> PriceDraft {
        let mut draft = PriceDraft::with_defaults(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        draft.zone_to_zone_prices.push(ZoneToZonePrice {
            from_zone_id: Uuid::new_v4(),
            to_zone_id: Uuid::new_v4(),
            amount: 12.0,
        });
        draft.airport_to_city_prices.push(AirportToCityPrice {
            from_airport_id: Uuid::new_v4(),
            to_city_id: draft.city_id,
            amount: 30.0,
        });
        draft.city_to_city_prices.push(CityToCityPrice {
            from_city_id: draft.city_id,
            to_city_id: Uuid::new_v4(),
            amount: 80.0,
        });
        draft.rental_packages.push(RentalPackage {
            package_name: "4 hours".into(),
            distance_for_base_price: 40.0,
            time_for_base_price: 4.0,
            base_price: 60.0,
            price_per_unit_distance: 1.0,
            price_per_unit_time: 0.5,
            business_status: true,
        });
        draft.surge.toggle_day(Weekday::Friday);
        draft
            .surge
            .add_time(
                Weekday::Friday,
                &SurgeTimeDraft {
                    start_time: "17:00".into(),
                    end_time: "20:00".into(),
                    multiplier: "1.5".into(),
                },
            )
            .unwrap();
        // понедельник с интервалом, но выключен
        draft
            .surge
            .add_time(
                Weekday::Monday,
                &SurgeTimeDraft {
                    start_time: "07:00".into(),
                    end_time: "09:00".into(),
                    multiplier: "1.2".into(),
                },
            )
            .unwrap();
        draft
    }

    fn keys(payload: &PriceConfigurationPayload) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(payload).unwrap() {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_all_flags_off_omits_conditional_lists() {
        let draft = filled_draft();
        let json = keys(&PriceConfigurationPayload::assemble(&draft).unwrap());
        assert!(!json.contains_key("zone_to_zone_prices"));
        assert!(!json.contains_key("airport_to_city_prices"));
        assert!(!json.contains_key("rental_packages"));
        assert!(!json.contains_key("surge_times"));
        assert_eq!(json["city_to_city_prices"].as_array().unwrap().len(), 1);
        assert!(json.contains_key("rich_area_surge"));
    }

    #[test]
    fn test_each_flag_gates_its_lists() {
        let mut draft = filled_draft();
        draft.flags.is_zone = true;
        let json = keys(&PriceConfigurationPayload::assemble(&draft).unwrap());
        assert!(json.contains_key("zone_to_zone_prices"));
        assert!(json.contains_key("airport_to_city_prices"));
        assert!(!json.contains_key("rental_packages"));

        draft.flags.is_zone = false;
        draft.flags.car_rental_business = true;
        let json = keys(&PriceConfigurationPayload::assemble(&draft).unwrap());
        assert!(!json.contains_key("zone_to_zone_prices"));
        assert_eq!(json["rental_packages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_surge_only_active_days_with_times() {
        let mut draft = filled_draft();
        draft.flags.is_surge_hours = true;
        draft.surge.toggle_day(Weekday::Sunday);
        let payload = PriceConfigurationPayload::assemble(&draft).unwrap();
        let days = payload.surge_times.unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, Weekday::Friday);
    }

    #[test]
    fn test_invalid_surge_blocks_save() {
        let mut draft = filled_draft();
        draft.flags.is_surge_hours = true;
        draft
            .surge
            .add_time(
                Weekday::Friday,
                &SurgeTimeDraft {
                    start_time: "19:00".into(),
                    end_time: "21:00".into(),
                    multiplier: "2".into(),
                },
            )
            .unwrap();
        let err = PriceConfigurationPayload::assemble(&draft).unwrap_err();
        assert!(err.contains("overlap"));

        // выключенные surge-часы не проверяются
        draft.flags.is_surge_hours = false;
        assert!(PriceConfigurationPayload::assemble(&draft).is_ok());
    }

    #[test]
    fn test_into_record_fills_absent_lists() {
        let draft = filled_draft();
        let payload = PriceConfigurationPayload::assemble(&draft).unwrap();
        let record = payload.into_record(RecordMeta::new());
        assert!(record.zone_to_zone_prices.is_empty());
        assert!(record.rental_packages.is_empty());
        assert_eq!(record.city_to_city_prices.len(), 1);
    }

    #[test]
    fn test_payload_deserializes_without_optional_lists() {
        let draft = filled_draft();
        let payload = PriceConfigurationPayload::assemble(&draft).unwrap();
        let text = serde_json::to_string(&payload).unwrap();
        let back: PriceConfigurationPayload = serde_json::from_str(&text).unwrap();
        assert_eq!(back, payload);
    }
}
