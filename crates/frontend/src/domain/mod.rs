pub mod a001_country;
pub mod a002_city;
pub mod a003_service_type;
pub mod a004_price_configuration;
pub mod a005_zone;
pub mod a006_promo_code;
pub mod a007_role;
pub mod a008_corporate_profile;
pub mod a009_hotel_profile;
pub mod a010_dispatcher_profile;
pub mod a011_driver_profile;
pub mod a012_user;
pub mod a013_ride;
pub mod a014_transaction;
pub mod partner;
