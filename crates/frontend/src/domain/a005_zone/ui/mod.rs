pub mod list;

pub use list::ZonesManagement;
