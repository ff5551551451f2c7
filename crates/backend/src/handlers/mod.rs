pub mod countries;
pub mod entities;
pub mod functions;
