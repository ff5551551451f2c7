pub mod aggregate;
pub mod editor;
pub mod payload;
pub mod surge;
