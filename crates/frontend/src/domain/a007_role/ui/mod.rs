pub mod list;

pub use list::RolesManagement;
