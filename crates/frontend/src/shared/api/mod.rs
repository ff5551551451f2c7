//! Типизированный клиент backend API.
//!
//! - `entities` — `entities.<Name>.{list, filter, create, update, delete}`
//! - `functions` — `functions.invoke` (geocode, r2Upload, syncCountries)
//! - `settings`, `countries`, `admins` — отдельные ресурсы
//! - `remote` — сторонние API, вызываемые прямо из браузера

pub mod admins;
pub mod countries;
pub mod entities;
pub mod functions;
pub mod http;
pub mod remote;
pub mod settings;
