//! Общие типы JoltCab Admin: записи сущностей, DTO и чистая логика,
//! которую используют и backend, и frontend.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
