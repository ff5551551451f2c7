use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a002_city::aggregate::City;
use contracts::domain::a003_service_type::aggregate::ServiceType;
use contracts::domain::a005_zone::aggregate::Zone;
use contracts::domain::a006_promo_code::aggregate::PromoCode;
use contracts::domain::a007_role::aggregate::Role;
use contracts::domain::a008_corporate_profile::aggregate::CorporateProfile;
use contracts::domain::a009_hotel_profile::aggregate::HotelProfile;
use contracts::domain::a010_dispatcher_profile::aggregate::DispatcherProfile;
use contracts::domain::a011_driver_profile::aggregate::DriverProfile;
use contracts::domain::a012_user::aggregate::User;
use contracts::domain::a013_ride::aggregate::Ride;
use contracts::domain::a014_transaction::aggregate::Transaction;

use super::store::{DocumentStore, EntityStore};
use crate::domain::a004_price_configuration::store::PriceConfigurationStore;

/// Все сущности `entities.*` в порядке индексов
pub fn all_stores() -> Vec<Box<dyn EntityStore>> {
    vec![
        Box::new(DocumentStore::<Country>::unique_on("code")),
        Box::new(DocumentStore::<City>::new()),
        Box::new(DocumentStore::<ServiceType>::new()),
        Box::new(PriceConfigurationStore),
        Box::new(DocumentStore::<Zone>::new()),
        Box::new(DocumentStore::<PromoCode>::unique_on("code")),
        Box::new(DocumentStore::<Role>::unique_on("name")),
        Box::new(DocumentStore::<CorporateProfile>::unique_on("email")),
        Box::new(DocumentStore::<HotelProfile>::unique_on("email")),
        Box::new(DocumentStore::<DispatcherProfile>::unique_on("email")),
        Box::new(DocumentStore::<DriverProfile>::new()),
        Box::new(DocumentStore::<User>::unique_on("email")),
        Box::new(DocumentStore::<Ride>::new()),
        Box::new(DocumentStore::<Transaction>::new()),
    ]
}

/// Хранилище по имени коллекции из URL
pub fn store_for(entity: &str) -> Option<Box<dyn EntityStore>> {
    all_stores().into_iter().find(|s| s.entity() == entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_names_are_unique() {
        let mut names: Vec<&str> = all_stores().iter().map(|s| s.entity()).collect();
        assert_eq!(names.len(), 14);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(
            store_for("price_configuration").map(|s| s.element_name()),
            Some("Price Configuration")
        );
        assert!(store_for("driver_profile").is_some());
        assert!(store_for("admin").is_none());
    }
}
