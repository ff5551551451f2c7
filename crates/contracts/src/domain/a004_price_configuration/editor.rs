//! Состояние редактора тарифной конфигурации.
//!
//! Редактор открывается только после выбора города и типа услуги.
//! Если для пары уже есть запись, редактор в режиме обновления и
//! загружает все поля из неё; иначе режим создания со значениями
//! по умолчанию.

use uuid::Uuid;

use super::aggregate::{
    AirportToCityPrice, CityToCityPrice, PriceConfiguration, RentalPackage, RichAreaSurge,
    ZoneToZonePrice,
};
use super::payload::{PriceConfigurationPayload, PriceDraft};
use super::surge::{SurgeTimeDraft, Weekday};

/// Сколько держится баннер успеха перед сбросом формы, мс
pub const SUCCESS_BANNER_MS: u32 = 2_000;
/// Через сколько скрывается сообщение об ошибке, мс
pub const ERROR_BANNER_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Update(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorTab {
    BasicRates,
    ZoneToZone,
    AirportToCity,
    CityToCity,
    CarRental,
    RichAreaSurge,
}

impl EditorTab {
    pub fn all() -> [EditorTab; 6] {
        [
            EditorTab::BasicRates,
            EditorTab::ZoneToZone,
            EditorTab::AirportToCity,
            EditorTab::CityToCity,
            EditorTab::CarRental,
            EditorTab::RichAreaSurge,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditorTab::BasicRates => "Basic Rates",
            EditorTab::ZoneToZone => "Zone to Zone",
            EditorTab::AirportToCity => "Airport to City",
            EditorTab::CityToCity => "City to City",
            EditorTab::CarRental => "Car Rental",
            EditorTab::RichAreaSurge => "Rich Area Surge",
        }
    }
}

/// Строковые поля формы для пакета аренды
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalPackageDraft {
    pub package_name: String,
    pub distance_for_base_price: String,
    pub time_for_base_price: String,
    pub base_price: String,
    pub price_per_unit_distance: String,
    pub price_per_unit_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceList {
    ZoneToZone,
    AirportToCity,
    CityToCity,
    RentalPackages,
    RichAreaSurge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceEditorState {
    pub mode: EditorMode,
    pub draft: PriceDraft,
    pub active_tab: EditorTab,
    pub selected_day: Weekday,
    pub surge_input: SurgeTimeDraft,
}

/// Разбор суммы из поля формы
pub fn parse_amount(value: &str, field: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required", field));
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| format!("{} must be a number", field))?;
    if amount < 0.0 || !amount.is_finite() {
        return Err(format!("{} cannot be negative", field));
    }
    Ok(amount)
}

fn require_pair(from: Option<Uuid>, to: Option<Uuid>) -> Result<(Uuid, Uuid), String> {
    match (from, to) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err("Please select both origin and destination".to_string()),
    }
}

impl PriceEditorState {
    /// Открыть редактор для выбранной пары
    pub fn open(
        country_id: Option<Uuid>,
        city_id: Option<Uuid>,
        service_type_id: Option<Uuid>,
        existing: &[PriceConfiguration],
    ) -> Result<Self, String> {
        let (city_id, service_type_id) = match (city_id, service_type_id) {
            (Some(c), Some(s)) => (c, s),
            _ => return Err("Please select a city and service type".to_string()),
        };
        let (mode, draft) = match PriceConfiguration::find_for(existing, city_id, service_type_id) {
            Some(config) => (
                EditorMode::Update(config.meta.id),
                PriceDraft::from_existing(config),
            ),
            None => {
                let country_id =
                    country_id.ok_or_else(|| "Selected city has no country".to_string())?;
                (
                    EditorMode::Create,
                    PriceDraft::with_defaults(country_id, city_id, service_type_id),
                )
            }
        };
        Ok(Self {
            mode,
            draft,
            active_tab: EditorTab::BasicRates,
            selected_day: Weekday::Monday,
            surge_input: SurgeTimeDraft::default(),
        })
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, EditorMode::Update(_))
    }

    /// Вкладка доступна, если включён её флаг
    pub fn tab_enabled(&self, tab: EditorTab) -> bool {
        match tab {
            EditorTab::ZoneToZone | EditorTab::AirportToCity => self.draft.flags.is_zone,
            EditorTab::CarRental => self.draft.flags.car_rental_business,
            EditorTab::BasicRates | EditorTab::CityToCity | EditorTab::RichAreaSurge => true,
        }
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        self.draft.surge.toggle_day(day);
    }

    /// Добавить интервал из полей ввода к выбранному дню
    pub fn add_surge_time(&mut self) -> Result<(), String> {
        self.draft
            .surge
            .add_time(self.selected_day, &self.surge_input)?;
        self.surge_input = SurgeTimeDraft::default();
        Ok(())
    }

    pub fn remove_surge_time(&mut self, day: Weekday, index: usize) {
        self.draft.surge.remove_time(day, index);
    }

    pub fn add_zone_to_zone(
        &mut self,
        from: Option<Uuid>,
        to: Option<Uuid>,
        amount: &str,
    ) -> Result<(), String> {
        let (from_zone_id, to_zone_id) = require_pair(from, to)?;
        if from_zone_id == to_zone_id {
            return Err("Origin and destination zones must differ".to_string());
        }
        let amount = parse_amount(amount, "Amount")?;
        self.draft.zone_to_zone_prices.push(ZoneToZonePrice {
            from_zone_id,
            to_zone_id,
            amount,
        });
        Ok(())
    }

    pub fn add_airport_to_city(
        &mut self,
        from: Option<Uuid>,
        to: Option<Uuid>,
        amount: &str,
    ) -> Result<(), String> {
        let (from_airport_id, to_city_id) = require_pair(from, to)?;
        let amount = parse_amount(amount, "Amount")?;
        self.draft.airport_to_city_prices.push(AirportToCityPrice {
            from_airport_id,
            to_city_id,
            amount,
        });
        Ok(())
    }

    pub fn add_city_to_city(
        &mut self,
        from: Option<Uuid>,
        to: Option<Uuid>,
        amount: &str,
    ) -> Result<(), String> {
        let (from_city_id, to_city_id) = require_pair(from, to)?;
        if from_city_id == to_city_id {
            return Err("Origin and destination cities must differ".to_string());
        }
        let amount = parse_amount(amount, "Amount")?;
        self.draft.city_to_city_prices.push(CityToCityPrice {
            from_city_id,
            to_city_id,
            amount,
        });
        Ok(())
    }

    pub fn add_rental_package(&mut self, input: &RentalPackageDraft) -> Result<(), String> {
        if input.package_name.trim().is_empty() {
            return Err("Package name is required".to_string());
        }
        let package = RentalPackage {
            package_name: input.package_name.trim().to_string(),
            distance_for_base_price: parse_amount(
                &input.distance_for_base_price,
                "Distance for base price",
            )?,
            time_for_base_price: parse_amount(&input.time_for_base_price, "Time for base price")?,
            base_price: parse_amount(&input.base_price, "Base price")?,
            price_per_unit_distance: parse_amount(
                &input.price_per_unit_distance,
                "Price per unit distance",
            )?,
            price_per_unit_time: parse_amount(&input.price_per_unit_time, "Price per unit time")?,
            business_status: true,
        };
        self.draft.rental_packages.push(package);
        Ok(())
    }

    pub fn add_rich_area_surge(
        &mut self,
        zone_id: Option<Uuid>,
        multiplier: &str,
    ) -> Result<(), String> {
        let zone_id = zone_id.ok_or_else(|| "Please select a zone".to_string())?;
        let surge_multiplier = parse_amount(multiplier, "Surge multiplier")?;
        if surge_multiplier == 0.0 {
            return Err("Surge multiplier must be positive".to_string());
        }
        if let Some(row) = self
            .draft
            .rich_area_surge
            .iter_mut()
            .find(|r| r.zone_id == zone_id)
        {
            row.surge_multiplier = surge_multiplier;
        } else {
            self.draft.rich_area_surge.push(RichAreaSurge {
                zone_id,
                surge_multiplier,
            });
        }
        Ok(())
    }

    pub fn remove_row(&mut self, list: PriceList, index: usize) {
        fn remove_at<T>(items: &mut Vec<T>, index: usize) {
            if index < items.len() {
                items.remove(index);
            }
        }
        let draft = &mut self.draft;
        match list {
            PriceList::ZoneToZone => remove_at(&mut draft.zone_to_zone_prices, index),
            PriceList::AirportToCity => remove_at(&mut draft.airport_to_city_prices, index),
            PriceList::CityToCity => remove_at(&mut draft.city_to_city_prices, index),
            PriceList::RentalPackages => remove_at(&mut draft.rental_packages, index),
            PriceList::RichAreaSurge => remove_at(&mut draft.rich_area_surge, index),
        }
    }

    /// Тело запроса для сохранения
    pub fn build_payload(&self) -> Result<PriceConfigurationPayload, String> {
        PriceConfigurationPayload::assemble(&self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_price_configuration::aggregate::{DistanceUnit, PriceFlags, PriceRates};
    use crate::domain::common::RecordMeta;

    fn stored(city: Uuid, service: Uuid) -> PriceConfiguration {
        PriceConfiguration {
            meta: RecordMeta::new(),
            country_id: Uuid::new_v4(),
            city_id: city,
            service_type_id: service,
            rates: PriceRates {
                provider_profit: 80.0,
                min_fare: 3.5,
                base_price: 4.0,
                distance_for_base_price: 2.0,
                price_per_unit_distance: 0.9,
                price_per_unit_time: 0.2,
                waiting_time_start_after_minute: 5,
                price_for_waiting_time: 0.4,
                cancellation_fee: 3.0,
                tax: 6.0,
                user_tax: 1.0,
                user_miscellaneous_fee: 0.5,
                provider_tax: 2.0,
                provider_miscellaneous_fee: 0.1,
                max_space: 6,
                distance_unit: DistanceUnit::Miles,
            },
            flags: PriceFlags {
                business_status: false,
                car_rental_business: true,
                is_zone: true,
                is_surge_hours: false,
                ai_pricing_enabled: true,
            },
            surge_times: vec![],
            zone_to_zone_prices: vec![],
            airport_to_city_prices: vec![],
            city_to_city_prices: vec![],
            rental_packages: vec![],
            rich_area_surge: vec![],
        }
    }

    #[test]
    fn test_open_requires_selection() {
        let err = PriceEditorState::open(None, Some(Uuid::new_v4()), None, &[]).unwrap_err();
        assert_eq!(err, "Please select a city and service type");
    }

    #[test]
    fn test_open_without_existing_uses_defaults() {
        let editor = PriceEditorState::open(
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            &[],
        )
        .unwrap();
        assert_eq!(editor.mode, EditorMode::Create);
        assert_eq!(editor.draft.rates, PriceRates::default());
        assert_eq!(editor.draft.flags, PriceFlags::default());
    }

    #[test]
    fn test_open_existing_preloads_every_scalar() {
        let city = Uuid::new_v4();
        let service = Uuid::new_v4();
        let existing = stored(city, service);
        let others = vec![stored(Uuid::new_v4(), service), existing.clone()];

        let editor =
            PriceEditorState::open(Some(Uuid::new_v4()), Some(city), Some(service), &others)
                .unwrap();
        assert_eq!(editor.mode, EditorMode::Update(existing.meta.id));
        assert!(editor.is_update());
        assert_eq!(editor.draft.rates, existing.rates);
        assert_eq!(editor.draft.flags, existing.flags);
        assert_eq!(editor.draft.country_id, existing.country_id);
    }

    #[test]
    fn test_add_surge_time_clears_input_on_success_only() {
        let mut editor = PriceEditorState::open(
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            &[],
        )
        .unwrap();
        editor.selected_day = Weekday::Thursday;
        editor.surge_input.start_time = "18:00".into();
        editor.surge_input.multiplier = "1.4".into();
        assert!(editor.add_surge_time().is_err());
        assert_eq!(editor.surge_input.start_time, "18:00");

        editor.surge_input.end_time = "21:00".into();
        editor.add_surge_time().unwrap();
        assert_eq!(editor.surge_input, SurgeTimeDraft::default());
        assert_eq!(editor.draft.surge.day(Weekday::Thursday).times.len(), 1);
    }

    #[test]
    fn test_tab_enabled_follows_flags() {
        let mut editor = PriceEditorState::open(
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            &[],
        )
        .unwrap();
        assert!(!editor.tab_enabled(EditorTab::ZoneToZone));
        assert!(editor.tab_enabled(EditorTab::CityToCity));
        editor.draft.flags.is_zone = true;
        assert!(editor.tab_enabled(EditorTab::AirportToCity));
        assert!(!editor.tab_enabled(EditorTab::CarRental));
    }

    #[test]
    fn test_row_editing() {
        let mut editor = PriceEditorState::open(
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            &[],
        )
        .unwrap();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert!(editor.add_zone_to_zone(Some(a), None, "10").is_err());
        assert!(editor.add_zone_to_zone(Some(a), Some(a), "10").is_err());
        assert!(editor.add_zone_to_zone(Some(a), Some(b), "-1").is_err());
        editor.add_zone_to_zone(Some(a), Some(b), "10").unwrap();
        assert_eq!(editor.draft.zone_to_zone_prices[0].amount, 10.0);

        editor.add_rich_area_surge(Some(a), "1.5").unwrap();
        editor.add_rich_area_surge(Some(a), "1.8").unwrap();
        assert_eq!(editor.draft.rich_area_surge.len(), 1);
        assert_eq!(editor.draft.rich_area_surge[0].surge_multiplier, 1.8);

        editor.remove_row(PriceList::ZoneToZone, 0);
        editor.remove_row(PriceList::ZoneToZone, 7);
        assert!(editor.draft.zone_to_zone_prices.is_empty());
    }

    #[test]
    fn test_rental_package_parsing() {
        let mut editor = PriceEditorState::open(
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
            &[],
        )
        .unwrap();
        let mut input = RentalPackageDraft {
            package_name: "Half day".into(),
            distance_for_base_price: "50".into(),
            time_for_base_price: "4".into(),
            base_price: "70".into(),
            price_per_unit_distance: "1.1".into(),
            price_per_unit_time: "".into(),
        };
        assert_eq!(
            editor.add_rental_package(&input),
            Err("Price per unit time is required".to_string())
        );
        input.price_per_unit_time = "0.5".into();
        editor.add_rental_package(&input).unwrap();
        assert_eq!(editor.draft.rental_packages[0].base_price, 70.0);
    }
}
