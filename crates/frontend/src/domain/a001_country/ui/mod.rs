pub mod list;
pub mod picker;

pub use list::CountriesManagement;
