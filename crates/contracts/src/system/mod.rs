pub mod admins;
pub mod auth;
pub mod functions;
pub mod settings;
