pub mod list;

pub use list::CorporateManagement;
