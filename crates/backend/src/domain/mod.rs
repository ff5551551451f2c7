pub mod a001_country;
pub mod a002_city;
pub mod a004_price_configuration;
pub mod a007_role;
pub mod entity_store;
