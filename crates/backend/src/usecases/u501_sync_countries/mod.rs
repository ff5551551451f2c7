pub mod executor;
pub mod restcountries_api_client;
