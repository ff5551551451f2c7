pub mod aggregate;
pub mod location;
