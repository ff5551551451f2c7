pub mod registry;
pub mod repository;
pub mod service;
pub mod store;
